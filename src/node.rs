use std::fmt;

/// Opaque, stable identifier of a node that already lives in the node store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The part of a node's data this crate reads or writes.
///
/// `props` is opaque: it belongs to the store and is carried along untouched.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NodeData<Props> {
    /// Position among the parent's children.
    pub index: usize,
    pub parent: Option<NodeId>,
    pub props: Props,
}

/// A node payload, either already in the store or a descriptor waiting to be inserted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Node<Props> {
    pub id: NodeId,
    pub data: NodeData<Props>,
}

impl<Props> Node<Props> {
    /// A detached node (no parent yet) at index 0.
    pub fn detached(id: impl Into<NodeId>, props: Props) -> Self {
        Self {
            id: id.into(),
            data: NodeData {
                index: 0,
                parent: None,
                props,
            },
        }
    }
}

/// Which per-node flag of [`ManagerEvents`] a store write targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum NodeEventKind {
    Active,
    Hover,
    Dragging,
}

/// Insert before or after the node the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DropPosition {
    Before,
    After,
}

/// A proposed drop location, as returned by the store's placement query.
///
/// A placement with `error` set is a rejection: it may be displayed, but never committed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Placement {
    pub parent: NodeId,
    pub index: usize,
    pub position: DropPosition,
    /// The sibling the pointer is over, if any.
    pub current_node: Option<NodeId>,
    pub error: Option<String>,
}

impl Placement {
    pub fn new(parent: impl Into<NodeId>, index: usize, position: DropPosition) -> Self {
        Self {
            parent: parent.into(),
            index,
            position,
            current_node: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_current_node(mut self, node: impl Into<NodeId>) -> Self {
        self.current_node = Some(node.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Child index the dragged node ends up at under [`Self::parent`].
    pub fn resolved_index(&self) -> usize {
        match self.position {
            DropPosition::Before => self.index,
            DropPosition::After => self.index + 1,
        }
    }
}

/// Interaction state held by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ManagerEvents {
    pub active: Option<NodeId>,
    pub hover: Option<NodeId>,
    pub dragging: Option<NodeId>,
    pub placeholder: Option<Placement>,
}

impl ManagerEvents {
    pub fn get(&self, kind: NodeEventKind) -> Option<&NodeId> {
        match kind {
            NodeEventKind::Active => self.active.as_ref(),
            NodeEventKind::Hover => self.hover.as_ref(),
            NodeEventKind::Dragging => self.dragging.as_ref(),
        }
    }

    /// Helper for store implementations.
    pub fn set(&mut self, kind: NodeEventKind, id: Option<NodeId>) {
        match kind {
            NodeEventKind::Active => self.active = id,
            NodeEventKind::Hover => self.hover = id,
            NodeEventKind::Dragging => self.dragging = id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_index_shifts_after() {
        assert_eq!(Placement::new("p", 2, DropPosition::After).resolved_index(), 3);
        assert_eq!(Placement::new("p", 2, DropPosition::Before).resolved_index(), 2);
    }

    #[test]
    fn error_marks_placement_invalid() {
        let placement = Placement::new("p", 0, DropPosition::Before).with_error("not a canvas");
        assert!(!placement.is_valid());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn manager_events_serde_json() {
        let events = ManagerEvents {
            active: Some("a".into()),
            hover: None,
            dragging: Some("b".into()),
            placeholder: Some(
                Placement::new("root", 1, DropPosition::After).with_current_node("c"),
            ),
        };
        let json = serde_json::to_string(&events).unwrap();
        let back: ManagerEvents = serde_json::from_str(&json).unwrap();
        assert_eq!(back, events);
    }
}
