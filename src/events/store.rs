use egui::{Id, Pos2};

use crate::node::{ManagerEvents, Node, NodeEventKind, NodeId, Placement};

use super::types::Channel;

/// The node-tree store and its placement query, as seen by [`super::EventManager`].
///
/// The store owns the tree and the [`ManagerEvents`]; the event manager only ever writes to it
/// through these actions.
pub trait NodeStore {
    type Props;
    type Error: std::error::Error + 'static;

    /// Latest interaction state.
    fn events(&self) -> &ManagerEvents;

    fn set_node_event(&mut self, kind: NodeEventKind, id: Option<NodeId>);

    fn set_placeholder(&mut self, placeholder: Option<Placement>);

    /// Insert a node that is not yet part of the tree. `node.data.index` is already resolved.
    ///
    /// # Errors
    /// Whatever the store rejects; the descriptor stays transient.
    fn add(&mut self, node: &Node<Self::Props>, parent: &NodeId) -> Result<(), Self::Error>;

    /// Move an existing node under `parent` at child `index`.
    ///
    /// # Errors
    /// Whatever the store rejects.
    fn move_node(
        &mut self,
        id: &NodeId,
        parent: &NodeId,
        index: usize,
    ) -> Result<(), Self::Error>;

    /// Map a pointer over `target` to a drop location for `dragged`, if there is one.
    fn drop_placeholder(
        &self,
        dragged: &NodeId,
        target: &NodeId,
        pointer: Pos2,
    ) -> Option<Placement>;

    /// Build the descriptor a palette drag carries, with an id not used by any other node.
    ///
    /// Called once per `dragstart` on a template element.
    fn create_node(&mut self, template: &Node<Self::Props>) -> Node<Self::Props>;
}

/// Element-level plumbing of the host (browser DOM, egui widgets, ...).
pub trait ElementHost {
    /// Set or remove the `draggable` attribute.
    fn set_draggable(&mut self, element: Id, draggable: bool);

    /// Start delivering `channel` events for `element`.
    fn listen(&mut self, element: Id, channel: Channel);

    fn unlisten(&mut self, element: Id, channel: Channel);
}

/// Error returned by [`super::EventManager::dispatch`].
#[derive(Debug)]
pub enum DispatchError<E> {
    /// The store rejected an `add` or `move`.
    Store(E),
}

impl<E: std::fmt::Display> std::fmt::Display for DispatchError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "node store error: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for DispatchError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl<E> From<E> for DispatchError<E> {
    fn from(err: E) -> Self {
        Self::Store(err)
    }
}
