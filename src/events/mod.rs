use std::collections::VecDeque;

use egui::Id;

use crate::node::{Node, NodeEventKind, NodeId};

mod connectors;
mod debounce;
mod debug;
mod drop_commit;
mod guard;
mod options;
mod placement;
mod projection;
mod reparent;
mod session;
mod store;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use debounce::TimerToken;
pub use options::{EventManagerOptions, PlaceholderRetention};
pub use projection::{
    project_placeholder, DefaultPlaceholderRenderer, GeometrySource, NodeGeometry,
    PlaceholderRenderer, PlaceholderView,
};
pub use store::{DispatchError, ElementHost, NodeStore};
pub use types::{Channel, Connector, DomEvent, DragSource, DraggedEntity, Propagation};

use connectors::ConnectorBinder;
use debounce::Debouncer;
use guard::EventGuard;
use session::SessionSlot;

/// Turns low-level pointer events on node elements into node-tree operations.
///
/// - `mousedown` / `mouseover` → debounced `active` / `hover` writes.
/// - `dragstart` → starts a drag session for an existing node or a transient descriptor.
/// - `dragenter` → asks the store for a placement, live-inserts transient descriptors,
///   publishes the placeholder.
/// - `dragend` → commits the last valid placeholder as a move, then always resets.
///
/// All state lives here (one editor instance = one manager); the tree itself lives in the
/// [`NodeStore`] passed to each call.
#[derive(Debug)]
pub struct EventManager<Props> {
    options: EventManagerOptions,
    guard: EventGuard,

    select: Debouncer<NodeId>,
    hover: Debouncer<NodeId>,

    session: SessionSlot<Props>,
    connectors: ConnectorBinder<Props>,

    debug_log: VecDeque<String>,
    debug_seq: u64,
}

impl<Props> Default for EventManager<Props> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Props> EventManager<Props> {
    pub fn new() -> Self {
        Self::new_with_options(EventManagerOptions::default())
    }

    pub fn new_with_options(options: EventManagerOptions) -> Self {
        Self {
            guard: EventGuard::new(options.enabled),
            select: Debouncer::new(options.debounce_window_secs),
            hover: Debouncer::new(options.debounce_window_secs),
            session: SessionSlot::default(),
            connectors: ConnectorBinder::default(),
            debug_log: VecDeque::new(),
            debug_seq: 0,
            options,
        }
    }

    pub fn options(&self) -> &EventManagerOptions {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.guard.enabled()
    }

    /// Is a drag gesture in progress?
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// What the current drag session is carrying.
    pub fn dragged(&self) -> Option<&DraggedEntity<Props>> {
        self.session.active().map(|s| s.entity())
    }

    /// Flip the global interaction switch.
    ///
    /// Disabling cancels pending debounced writes, ends any drag in progress (clearing the
    /// placeholder and the dragging flag) and detaches all connectors from their elements.
    /// Enabling re-attaches them.
    pub fn set_enabled<S: NodeStore + ?Sized>(
        &mut self,
        enabled: bool,
        store: &mut S,
        host: &mut dyn ElementHost,
    ) {
        if !self.guard.set_enabled(enabled) {
            return;
        }
        self.options.enabled = enabled;
        log::debug!("interaction {}", if enabled { "enabled" } else { "disabled" });

        if !enabled {
            self.select.cancel();
            self.hover.cancel();
            if let Some(session) = self.session.take() {
                self.debug_log_event(format!(
                    "session ABORT id={} drag={} (disabled)",
                    session.id(),
                    session.drag_id()
                ));
                store.set_placeholder(None);
                store.set_node_event(NodeEventKind::Dragging, None);
            }
        }

        self.connectors.set_enabled(enabled, host, store);
    }

    /// Bind `element` to the tree node `node` for `connector`.
    ///
    /// Safe to call every frame; repeated calls are no-ops.
    pub fn connect(
        &mut self,
        connector: Connector,
        element: Id,
        node: impl Into<NodeId>,
        host: &mut dyn ElementHost,
    ) where
        Props: PartialEq,
    {
        let enabled = self.guard.enabled();
        self.connectors
            .connect(enabled, connector, element, DragSource::Node(node.into()), host);
    }

    /// Make `element` a drag source that creates a new node from `template` (e.g. a palette item).
    pub fn connect_template(
        &mut self,
        element: Id,
        template: Node<Props>,
        host: &mut dyn ElementHost,
    ) where
        Props: PartialEq,
    {
        let enabled = self.guard.enabled();
        self.connectors.connect(
            enabled,
            Connector::Drag,
            element,
            DragSource::Template(template),
            host,
        );
    }

    pub fn disconnect<S: NodeStore + ?Sized>(
        &mut self,
        connector: Connector,
        element: Id,
        host: &mut dyn ElementHost,
        store: &mut S,
    ) {
        self.connectors.disconnect(connector, element, host, store);
    }

    /// Route a host event to its handler through the connector bound to `event.element`.
    ///
    /// Events on elements with no live binding for that channel are ignored, except a `dragend`
    /// during a drag: the source element may have been unbound mid-gesture, and the session
    /// still ends.
    ///
    /// # Errors
    /// A store `add` or `move` failed. Session cleanup has already happened when this is
    /// returned from a `dragend`.
    pub fn dispatch<S>(
        &mut self,
        event: DomEvent,
        store: &mut S,
    ) -> Result<Propagation, DispatchError<S::Error>>
    where
        S: NodeStore<Props = Props> + ?Sized,
    {
        if !self.guard.enabled() {
            return Ok(Propagation::NONE);
        }

        // Anything due from earlier events lands before this one.
        self.tick(event.time, store);

        let Some(source) = self.connectors.lookup(event.element, event.channel) else {
            if event.channel == Channel::DragEnd && self.session.is_dragging() {
                log::debug!("dragend on unbound element {:?}; ending drag", event.element);
                return self.drag_node_end(store);
            }
            log::trace!(
                "{} on unbound element {:?}",
                event.channel.event_type(),
                event.element
            );
            return Ok(Propagation::NONE);
        };

        match event.channel {
            Channel::Select => {
                let id = source.id().clone();
                Ok(self.select_node(event.time, id))
            }
            Channel::Hover => {
                let id = source.id().clone();
                Ok(self.hover_node(event.time, id))
            }
            Channel::DragStart => {
                let entity = source.start_entity(store);
                Ok(self.drag_node(entity, store))
            }
            Channel::DragOver => Ok(self.drag_node_over()),
            Channel::DragEnter => {
                let target = source.id().clone();
                self.drag_node_enter(&target, event.pointer, store)
            }
            Channel::DragEnd => self.drag_node_end(store),
        }
    }

    /// Apply debounced `active`/`hover` writes whose window has passed.
    ///
    /// Call once per frame (or scheduling tick) with the same clock as [`DomEvent::time`].
    pub fn tick<S: NodeStore + ?Sized>(&mut self, time: f64, store: &mut S) {
        if !self.guard.enabled() {
            return;
        }
        if let Some(id) = self.select.poll(time) {
            store.set_node_event(NodeEventKind::Active, Some(id));
        }
        if let Some(id) = self.hover.poll(time) {
            log::trace!("hover {id}");
            store.set_node_event(NodeEventKind::Hover, Some(id));
        }
    }

    /// `mousedown` on a node: schedule the `active` write.
    pub fn select_node(&mut self, time: f64, id: NodeId) -> Propagation {
        let guard = self.guard;
        guard.run(Channel::Select, || {
            self.select.call(time, id);
        });
        Propagation::NONE
    }

    /// `mouseover` on a node: schedule the `hover` write.
    pub fn hover_node(&mut self, time: f64, id: NodeId) -> Propagation {
        let guard = self.guard;
        guard.run(Channel::Hover, || {
            self.hover.call(time, id);
        });
        Propagation::NONE
    }

    /// Number of live `(element, connector)` bindings, attached or not.
    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    /// Pending debounced writes, for hosts that schedule their own wake-ups.
    pub fn pending_tokens(&self) -> [Option<TimerToken>; 2] {
        [self.select.pending_token(), self.hover.pending_token()]
    }
}
