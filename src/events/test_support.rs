use std::cell::Cell;

use ahash::AHashSet;
use egui::{Id, Pos2};

use crate::node::{ManagerEvents, Node, NodeEventKind, NodeId, Placement};

use super::store::{ElementHost, NodeStore};
use super::types::Channel;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StoreCall<Props> {
    SetNodeEvent(NodeEventKind, Option<NodeId>),
    SetPlaceholder(Option<Placement>),
    Add(Node<Props>, NodeId),
    Move(NodeId, NodeId, usize),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MockError(pub(crate) &'static str);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for MockError {}

/// Records every action and answers placement queries from a per-target table.
#[derive(Debug)]
pub(crate) struct MockStore<Props = ()> {
    pub(crate) events: ManagerEvents,
    pub(crate) calls: Vec<StoreCall<Props>>,
    pub(crate) placements: Vec<(NodeId, Placement)>,
    pub(crate) queries: Cell<usize>,
    pub(crate) fail_add: bool,
    pub(crate) fail_move: bool,
    minted: usize,
}

impl<Props> Default for MockStore<Props> {
    fn default() -> Self {
        Self {
            events: ManagerEvents::default(),
            calls: Vec::new(),
            placements: Vec::new(),
            queries: Cell::new(0),
            fail_add: false,
            fail_move: false,
            minted: 0,
        }
    }
}

impl<Props> MockStore<Props> {
    pub(crate) fn answer(&mut self, target: &str, placement: Placement) {
        self.placements.retain(|(t, _)| t.as_str() != target);
        self.placements.push((target.into(), placement));
    }

    pub(crate) fn adds(&self) -> Vec<&Node<Props>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                StoreCall::Add(node, _) => Some(node),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn moves(&self) -> Vec<(NodeId, NodeId, usize)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                StoreCall::Move(id, parent, index) => Some((id.clone(), parent.clone(), *index)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn node_events(&self, kind: NodeEventKind) -> Vec<Option<NodeId>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                StoreCall::SetNodeEvent(k, id) if *k == kind => Some(id.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<Props: Clone> NodeStore for MockStore<Props> {
    type Props = Props;
    type Error = MockError;

    fn events(&self) -> &ManagerEvents {
        &self.events
    }

    fn set_node_event(&mut self, kind: NodeEventKind, id: Option<NodeId>) {
        self.events.set(kind, id.clone());
        self.calls.push(StoreCall::SetNodeEvent(kind, id));
    }

    fn set_placeholder(&mut self, placeholder: Option<Placement>) {
        self.events.placeholder.clone_from(&placeholder);
        self.calls.push(StoreCall::SetPlaceholder(placeholder));
    }

    fn add(&mut self, node: &Node<Props>, parent: &NodeId) -> Result<(), MockError> {
        if self.fail_add {
            return Err(MockError("add rejected"));
        }
        self.calls.push(StoreCall::Add(node.clone(), parent.clone()));
        Ok(())
    }

    fn move_node(&mut self, id: &NodeId, parent: &NodeId, index: usize) -> Result<(), MockError> {
        if self.fail_move {
            return Err(MockError("move rejected"));
        }
        self.calls
            .push(StoreCall::Move(id.clone(), parent.clone(), index));
        Ok(())
    }

    fn drop_placeholder(
        &self,
        _dragged: &NodeId,
        target: &NodeId,
        _pointer: Pos2,
    ) -> Option<Placement> {
        self.queries.set(self.queries.get() + 1);
        self.placements
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, p)| p.clone())
    }

    /// `<template id>-<n>`, counting from 1.
    fn create_node(&mut self, template: &Node<Props>) -> Node<Props> {
        self.minted += 1;
        Node {
            id: NodeId::new(format!("{}-{}", template.id, self.minted)),
            data: template.data.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockHost {
    draggable: AHashSet<Id>,
    listening: AHashSet<(Id, Channel)>,
    pub(crate) listen_calls: usize,
    pub(crate) unlisten_calls: usize,
}

impl MockHost {
    pub(crate) fn is_draggable(&self, element: Id) -> bool {
        self.draggable.contains(&element)
    }

    pub(crate) fn is_listening(&self, element: Id, channel: Channel) -> bool {
        self.listening.contains(&(element, channel))
    }

    pub(crate) fn any_draggable(&self) -> bool {
        !self.draggable.is_empty()
    }
}

impl ElementHost for MockHost {
    fn set_draggable(&mut self, element: Id, draggable: bool) {
        if draggable {
            self.draggable.insert(element);
        } else {
            self.draggable.remove(&element);
        }
    }

    fn listen(&mut self, element: Id, channel: Channel) {
        self.listen_calls += 1;
        self.listening.insert((element, channel));
    }

    fn unlisten(&mut self, element: Id, channel: Channel) {
        self.unlisten_calls += 1;
        self.listening.remove(&(element, channel));
    }
}
