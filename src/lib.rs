//! Drag-and-drop interaction core for hierarchical node editors.
//!
//! [`EventManager`] turns pointer events on node elements (press, hover, drag start/over/enter/end)
//! into node-tree operations on a [`NodeStore`]: select, hover-highlight, live reparenting of
//! nodes dragged in from outside the tree, and commit-on-drop.

#![forbid(unsafe_code)]

pub mod events;
pub mod node;

pub use events::{
    project_placeholder, Channel, Connector, DefaultPlaceholderRenderer, DispatchError, DomEvent,
    DragSource, DraggedEntity, ElementHost, EventManager, EventManagerOptions, GeometrySource,
    NodeGeometry, NodeStore, PlaceholderRenderer, PlaceholderRetention, PlaceholderView,
    Propagation, TimerToken,
};
pub use node::{DropPosition, ManagerEvents, Node, NodeData, NodeEventKind, NodeId, Placement};
