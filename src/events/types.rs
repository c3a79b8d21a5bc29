use egui::{Id, Pos2};

use crate::node::{Node, NodeId};

use super::store::NodeStore;

/// The fixed set of interaction channels a node element can listen on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Channel {
    Select,
    Hover,
    DragStart,
    DragOver,
    DragEnter,
    DragEnd,
}

impl Channel {
    pub const ALL: [Self; 6] = [
        Self::Select,
        Self::Hover,
        Self::DragStart,
        Self::DragOver,
        Self::DragEnter,
        Self::DragEnd,
    ];

    /// The DOM event type the host should listen for.
    pub fn event_type(self) -> &'static str {
        match self {
            Self::Select => "mousedown",
            Self::Hover => "mouseover",
            Self::DragStart => "dragstart",
            Self::DragOver => "dragover",
            Self::DragEnter => "dragenter",
            Self::DragEnd => "dragend",
        }
    }

    /// Selection and hover bubble through nested elements and get coalesced.
    pub fn debounced(self) -> bool {
        matches!(self, Self::Select | Self::Hover)
    }

    /// The connector whose binding answers events on this channel.
    pub fn connector(self) -> Connector {
        match self {
            Self::Select => Connector::Active,
            Self::Hover => Connector::Hover,
            Self::DragStart | Self::DragEnd => Connector::Drag,
            Self::DragOver | Self::DragEnter => Connector::Drop,
        }
    }
}

/// Named bindings a node element can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Connector {
    Active,
    Drag,
    Hover,
    Drop,
}

impl Connector {
    pub fn channels(self) -> &'static [Channel] {
        match self {
            Self::Active => &[Channel::Select],
            Self::Drag => &[Channel::DragStart, Channel::DragEnd],
            Self::Hover => &[Channel::Hover],
            Self::Drop => &[Channel::DragOver, Channel::DragEnter],
        }
    }
}

/// A low-level pointer event delivered by the host for one element.
#[derive(Clone, Copy, Debug)]
pub struct DomEvent {
    pub channel: Channel,
    pub element: Id,
    /// Pointer position in the host's client coordinates.
    pub pointer: Pos2,
    /// Event timestamp in seconds, on the same clock as [`super::EventManager::tick`].
    pub time: f64,
}

impl DomEvent {
    pub fn new(channel: Channel, element: Id, pointer: Pos2, time: f64) -> Self {
        Self {
            channel,
            element,
            pointer,
            time,
        }
    }
}

/// What the host should do with the browser event after a handler ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Propagation {
    pub stop_propagation: bool,
    pub prevent_default: bool,
}

impl Propagation {
    /// Leave the event alone.
    pub const NONE: Self = Self {
        stop_propagation: false,
        prevent_default: false,
    };

    pub const STOP: Self = Self {
        stop_propagation: true,
        prevent_default: false,
    };

    pub const STOP_AND_PREVENT: Self = Self {
        stop_propagation: true,
        prevent_default: true,
    };
}

/// What is being dragged in the current session.
#[derive(Clone, Debug, PartialEq)]
pub enum DraggedEntity<Props> {
    /// A node already in the tree.
    Existing(NodeId),

    /// A descriptor not yet inserted into the tree (e.g. dragged from a palette).
    Transient(Node<Props>),
}

impl<Props> DraggedEntity<Props> {
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Existing(id) => id,
            Self::Transient(node) => &node.id,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// What a drag connector binds an element to.
#[derive(Clone, Debug, PartialEq)]
pub enum DragSource<Props> {
    /// Dragging the element moves this tree node.
    Node(NodeId),

    /// Each drag of the element creates a new node from this template
    /// ([`NodeStore::create_node`]).
    Template(Node<Props>),
}

impl<Props> DragSource<Props> {
    /// The entity a `dragstart` on this source carries. Templates are minted afresh every time.
    pub(super) fn start_entity<S>(&self, store: &mut S) -> DraggedEntity<Props>
    where
        S: NodeStore<Props = Props> + ?Sized,
    {
        match self {
            Self::Node(id) => DraggedEntity::Existing(id.clone()),
            Self::Template(template) => DraggedEntity::Transient(store.create_node(template)),
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Self::Node(id) => id,
            Self::Template(node) => &node.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_select_and_hover_are_debounced() {
        let debounced: Vec<Channel> = Channel::ALL.into_iter().filter(|c| c.debounced()).collect();
        assert_eq!(debounced, vec![Channel::Select, Channel::Hover]);
    }

    #[test]
    fn every_channel_belongs_to_its_connector() {
        for channel in Channel::ALL {
            assert!(
                channel.connector().channels().contains(&channel),
                "{channel:?} missing from {:?}",
                channel.connector()
            );
        }
    }
}
