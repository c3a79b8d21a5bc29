use crate::node::NodeEventKind;

use super::EventManager;
use super::placement::commit_target;
use super::store::{DispatchError, NodeStore};
use super::types::{Channel, DraggedEntity, Propagation};

impl<Props> EventManager<Props> {
    /// `dragend`: commit the standing placeholder as a move (if valid), then reset.
    ///
    /// The reset (dragged reference, placeholder, dragging flag) happens whether or not a move
    /// was committed, and also when the move fails.
    ///
    /// # Errors
    /// The store rejected the final move.
    pub fn drag_node_end<S: NodeStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Propagation, DispatchError<S::Error>> {
        let guard = self.guard;
        guard
            .run(Channel::DragEnd, || {
                self.end_session(store).map(|()| Propagation::STOP)
            })
            .unwrap_or(Ok(Propagation::NONE))
    }

    fn end_session<S: NodeStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<(), DispatchError<S::Error>> {
        let Some(session) = self.session.take() else {
            log::warn!("dragend outside of a drag gesture; ignored");
            return Ok(());
        };

        let placeholder = store.events().placeholder.clone();
        let committed = match (session.entity(), commit_target(placeholder.as_ref())) {
            (DraggedEntity::Existing(id), Some((parent, index))) => {
                let inserted_at = session.inserted_at();
                if inserted_at.is_some() && inserted_at == placeholder.as_ref() {
                    // Already sitting where it was live-inserted.
                    self.debug_log_event(format!(
                        "session DROP id={} node={id} kept at live insert",
                        session.id()
                    ));
                    Ok(())
                } else {
                    log::debug!("commit move node={id} parent={parent} index={index}");
                    self.debug_log_event(format!(
                        "session DROP id={} node={id} parent={parent} index={index}",
                        session.id()
                    ));
                    store.move_node(id, &parent, index)
                }
            }
            (DraggedEntity::Transient(node), Some(_)) => {
                log::warn!("drop of {} before it was ever inserted; discarded", node.id);
                Ok(())
            }
            (entity, None) => {
                self.debug_log_event(format!(
                    "session DROP id={} drag={} nothing to commit (placeholder={})",
                    session.id(),
                    entity.id(),
                    match &placeholder {
                        None => "none",
                        Some(_) => "rejected",
                    }
                ));
                Ok(())
            }
        };

        store.set_placeholder(None);
        store.set_node_event(NodeEventKind::Dragging, None);
        log::debug!("drag end session={}", session.id());

        committed.inspect_err(|err| {
            log::warn!("final move of {} failed: {err}", session.drag_id());
        })?;
        Ok(())
    }
}
