use std::collections::hash_map::Entry;

use ahash::AHashMap;
use egui::Id;
use itertools::Itertools as _;

use crate::node::NodeEventKind;

use super::store::{ElementHost, NodeStore};
use super::types::{Channel, Connector, DragSource};

#[derive(Debug)]
struct Binding<Props> {
    source: DragSource<Props>,
    /// Listeners (and `draggable`) are currently on the element.
    attached: bool,
}

/// Binds the named connectors to host elements, and keeps the elements in sync with the
/// enabled flag.
///
/// Records survive a disable; only the element-level attachment is dropped, so nothing
/// (e.g. `draggable="true"`) lingers on a disabled editor.
#[derive(Debug)]
pub(super) struct ConnectorBinder<Props> {
    bindings: AHashMap<(Id, Connector), Binding<Props>>,
}

impl<Props> Default for ConnectorBinder<Props> {
    fn default() -> Self {
        Self {
            bindings: AHashMap::default(),
        }
    }
}

fn flag_for(connector: Connector) -> Option<NodeEventKind> {
    match connector {
        Connector::Active => Some(NodeEventKind::Active),
        Connector::Hover => Some(NodeEventKind::Hover),
        Connector::Drag => Some(NodeEventKind::Dragging),
        Connector::Drop => None,
    }
}

fn attach(host: &mut dyn ElementHost, connector: Connector, element: Id) {
    if connector == Connector::Drag {
        host.set_draggable(element, true);
    }
    for &channel in connector.channels() {
        host.listen(element, channel);
    }
}

fn detach<Props, S: NodeStore + ?Sized>(
    host: &mut dyn ElementHost,
    store: &mut S,
    connector: Connector,
    element: Id,
    source: &DragSource<Props>,
) {
    for &channel in connector.channels() {
        host.unlisten(element, channel);
    }
    if connector == Connector::Drag {
        host.set_draggable(element, false);
    }
    // Only clear the flag if it still points at this node.
    if let Some(kind) = flag_for(connector) {
        if store.events().get(kind) == Some(source.id()) {
            store.set_node_event(kind, None);
        }
    }
}

impl<Props> ConnectorBinder<Props> {
    /// Bind `element` to `source` for `connector`. Repeated calls are no-ops.
    pub(super) fn connect(
        &mut self,
        enabled: bool,
        connector: Connector,
        element: Id,
        source: DragSource<Props>,
        host: &mut dyn ElementHost,
    ) where
        Props: PartialEq,
    {
        let binding = match self.bindings.entry((element, connector)) {
            Entry::Occupied(entry) => {
                let binding = entry.into_mut();
                if binding.source != source {
                    log::trace!("rebind {connector:?} {element:?} -> {}", source.id());
                    binding.source = source;
                }
                binding
            }
            Entry::Vacant(entry) => entry.insert(Binding {
                source,
                attached: false,
            }),
        };
        if enabled && !binding.attached {
            attach(host, connector, element);
            binding.attached = true;
        }
    }

    /// Remove the binding. Unbinding something that isn't bound is a no-op.
    pub(super) fn disconnect<S: NodeStore + ?Sized>(
        &mut self,
        connector: Connector,
        element: Id,
        host: &mut dyn ElementHost,
        store: &mut S,
    ) {
        let Some(binding) = self.bindings.remove(&(element, connector)) else {
            return;
        };
        if binding.attached {
            detach(host, store, connector, element, &binding.source);
        }
    }

    /// Re-derive every element attachment from the enabled flag.
    pub(super) fn set_enabled<S: NodeStore + ?Sized>(
        &mut self,
        enabled: bool,
        host: &mut dyn ElementHost,
        store: &mut S,
    ) {
        let keys = self
            .bindings
            .iter()
            .filter(|(_, binding)| binding.attached != enabled)
            .map(|(key, _)| *key)
            .sorted_by_key(|(element, connector)| (element.value(), *connector))
            .collect_vec();

        for (element, connector) in keys {
            let Some(binding) = self.bindings.get_mut(&(element, connector)) else {
                continue;
            };
            if enabled {
                attach(host, connector, element);
            } else {
                detach(host, store, connector, element, &binding.source);
            }
            binding.attached = enabled;
        }
    }

    /// The source an event on `element` refers to, if the element is live for that channel.
    pub(super) fn lookup(&self, element: Id, channel: Channel) -> Option<&DragSource<Props>> {
        self.bindings
            .get(&(element, channel.connector()))
            .filter(|binding| binding.attached)
            .map(|binding| &binding.source)
    }

    pub(super) fn len(&self) -> usize {
        self.bindings.len()
    }
}
