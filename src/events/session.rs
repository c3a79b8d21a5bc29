use crate::node::{NodeId, Placement};

use super::types::DraggedEntity;

/// State of one drag gesture, from `dragstart` to the matching `dragend`.
#[derive(Debug)]
pub(super) struct DragSession<Props> {
    id: u64,
    entity: DraggedEntity<Props>,
    /// Placement used for the live insertion of a transient entity.
    inserted_at: Option<Placement>,
}

impl<Props> DragSession<Props> {
    pub(super) fn new(id: u64, entity: DraggedEntity<Props>) -> Self {
        Self {
            id,
            entity,
            inserted_at: None,
        }
    }

    pub(super) fn id(&self) -> u64 {
        self.id
    }

    pub(super) fn entity(&self) -> &DraggedEntity<Props> {
        &self.entity
    }

    pub(super) fn entity_mut(&mut self) -> &mut DraggedEntity<Props> {
        &mut self.entity
    }

    pub(super) fn drag_id(&self) -> &NodeId {
        self.entity.id()
    }

    pub(super) fn inserted_at(&self) -> Option<&Placement> {
        self.inserted_at.as_ref()
    }

    /// One-way `Transient -> Existing` conversion after the store accepted the descriptor.
    ///
    /// Returns `false` (and changes nothing) if the entity was already an existing node.
    pub(super) fn mark_inserted(&mut self, placement: Placement) -> bool {
        let DraggedEntity::Transient(node) = &self.entity else {
            return false;
        };
        let id = node.id.clone();
        self.entity = DraggedEntity::Existing(id);
        self.inserted_at = Some(placement);
        true
    }
}

/// Single-owner cell holding at most one [`DragSession`].
#[derive(Debug)]
pub(super) struct SessionSlot<Props> {
    next_id: u64,
    active: Option<DragSession<Props>>,
}

impl<Props> Default for SessionSlot<Props> {
    fn default() -> Self {
        Self {
            next_id: 1,
            active: None,
        }
    }
}

impl<Props> SessionSlot<Props> {
    /// Start a new session. A session still alive from an earlier gesture is returned.
    pub(super) fn start(
        &mut self,
        entity: DraggedEntity<Props>,
    ) -> (u64, Option<DragSession<Props>>) {
        let id = self.next_id;
        self.next_id = id.saturating_add(1);
        let previous = self.active.replace(DragSession::new(id, entity));
        (id, previous)
    }

    pub(super) fn active(&self) -> Option<&DragSession<Props>> {
        self.active.as_ref()
    }

    pub(super) fn active_mut(&mut self) -> Option<&mut DragSession<Props>> {
        self.active.as_mut()
    }

    pub(super) fn take(&mut self) -> Option<DragSession<Props>> {
        self.active.take()
    }

    pub(super) fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}
