/// What happens to a standing placeholder when the pointer enters a node that yields no placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PlaceholderRetention {
    /// Keep showing the last placement until it is replaced or the drag ends.
    #[default]
    Sticky,

    /// Clear the placeholder as soon as the pointer is over something that can't take the drop.
    ClearOnMiss,
}

/// Options for [`super::EventManager`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventManagerOptions {
    /// Global interaction switch. When `false`, every handler is a no-op.
    pub enabled: bool,

    /// Trailing coalescing window (seconds) for selection and hover writes.
    ///
    /// Bursts of `mousedown`/`mouseover` bubbling through nested elements inside this window
    /// collapse to the last call.
    pub debounce_window_secs: f64,

    /// See [`PlaceholderRetention`].
    pub placeholder_retention: PlaceholderRetention,

    /// Thickness (in points) of the projected insertion indicator.
    pub placeholder_thickness: f32,

    /// Suggested transition for the renderer when the indicator moves.
    pub placeholder_transition_secs: f32,

    /// If true, record handler decisions in a small ring buffer (see `debug_log_text`).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for EventManagerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_window_secs: 0.001,
            placeholder_retention: PlaceholderRetention::Sticky,
            placeholder_thickness: 2.0,
            placeholder_transition_secs: 0.2,
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

impl EventManagerOptions {
    pub(crate) fn clear_placeholder_on_miss(&self) -> bool {
        self.placeholder_retention == PlaceholderRetention::ClearOnMiss
    }
}
