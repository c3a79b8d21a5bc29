use egui::Pos2;

use crate::node::{NodeEventKind, NodeId, Placement};

use super::EventManager;
use super::placement::{resolve_placement, PlacementDecision};
use super::store::{DispatchError, NodeStore};
use super::types::{Channel, DraggedEntity, Propagation};

impl<Props> EventManager<Props> {
    /// `dragstart`: this gesture now belongs to a new drag session.
    pub fn drag_node<S: NodeStore + ?Sized>(
        &mut self,
        entity: DraggedEntity<Props>,
        store: &mut S,
    ) -> Propagation {
        let guard = self.guard;
        guard
            .run(Channel::DragStart, || {
                let transient = entity.is_transient();
                let drag_id = entity.id().clone();
                let (session_id, stale) = self.session.start(entity);
                if let Some(stale) = stale {
                    log::warn!(
                        "drag session {} (drag={}) never ended; replaced by session {session_id}",
                        stale.id(),
                        stale.drag_id()
                    );
                    if store.events().placeholder.is_some() {
                        store.set_placeholder(None);
                    }
                    if store.events().dragging.is_some() {
                        store.set_node_event(NodeEventKind::Dragging, None);
                    }
                }

                // Nothing to highlight for a transient node until it is in the tree.
                if !transient {
                    store.set_node_event(NodeEventKind::Dragging, Some(drag_id.clone()));
                }

                log::debug!("drag start session={session_id} drag={drag_id} transient={transient}");
                self.debug_log_event(format!(
                    "session START id={session_id} drag={drag_id} transient={transient}"
                ));
                Propagation::STOP
            })
            .unwrap_or(Propagation::NONE)
    }

    /// `dragover`: only keeps the browser gesture alive.
    pub fn drag_node_over(&mut self) -> Propagation {
        self.guard
            .run(Channel::DragOver, || Propagation::STOP_AND_PREVENT)
            .unwrap_or(Propagation::NONE)
    }

    /// `dragenter` on `target`: recompute the placement and, for a transient node, insert it
    /// live at the first valid one.
    ///
    /// # Errors
    /// The store rejected the live insertion. The placeholder is still published and the
    /// entity stays transient.
    pub fn drag_node_enter<S>(
        &mut self,
        target: &NodeId,
        pointer: Pos2,
        store: &mut S,
    ) -> Result<Propagation, DispatchError<S::Error>>
    where
        S: NodeStore<Props = Props> + ?Sized,
    {
        let guard = self.guard;
        guard
            .run(Channel::DragEnter, || {
                self.enter_target(target, pointer, store)
                    .map(|()| Propagation::STOP_AND_PREVENT)
            })
            .unwrap_or(Ok(Propagation::NONE))
    }

    fn enter_target<S>(
        &mut self,
        target: &NodeId,
        pointer: Pos2,
        store: &mut S,
    ) -> Result<(), DispatchError<S::Error>>
    where
        S: NodeStore<Props = Props> + ?Sized,
    {
        let Some(session) = self.session.active() else {
            log::warn!("dragenter on {target} outside of a drag gesture; ignored");
            return Ok(());
        };
        let session_id = session.id();
        let drag_id = session.drag_id().clone();

        let decision = resolve_placement(store, &drag_id, target, pointer);
        let inserted = match &decision {
            PlacementDecision::NoTarget => {
                let clear = self.options.clear_placeholder_on_miss();
                if clear && store.events().placeholder.is_some() {
                    store.set_placeholder(None);
                }
                log::trace!("dragenter {target}: no placement for {drag_id}");
                return Ok(());
            }
            PlacementDecision::Valid(placement) => self.insert_transient(placement, store),
            PlacementDecision::Rejected(placement) => {
                self.debug_log_event(format!(
                    "placement REJECTED id={session_id} target={target} reason={}",
                    placement.error.as_deref().unwrap_or_default()
                ));
                Ok(())
            }
        };

        store.set_placeholder(decision.into_placement());
        inserted
    }

    /// Insert the session's transient descriptor at `placement`, converting the session to an
    /// existing node. No-op once the entity is an existing node.
    fn insert_transient<S>(
        &mut self,
        placement: &Placement,
        store: &mut S,
    ) -> Result<(), DispatchError<S::Error>>
    where
        S: NodeStore<Props = Props> + ?Sized,
    {
        let Some(session) = self.session.active_mut() else {
            return Ok(());
        };
        let session_id = session.id();
        let DraggedEntity::Transient(node) = session.entity_mut() else {
            return Ok(());
        };

        node.data.index = placement.resolved_index();
        store.add(node, &placement.parent).inspect_err(|err| {
            log::warn!("live insert of {} under {} failed: {err}", node.id, placement.parent);
        })?;
        let id = node.id.clone();
        session.mark_inserted(placement.clone());
        store.set_node_event(NodeEventKind::Dragging, Some(id.clone()));

        log::debug!(
            "live insert session={session_id} node={id} parent={} index={}",
            placement.parent,
            placement.resolved_index()
        );
        self.debug_log_event(format!(
            "session INSERT id={session_id} node={id} parent={} index={}",
            placement.parent,
            placement.resolved_index()
        ));
        Ok(())
    }
}
