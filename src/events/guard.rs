use super::types::Channel;

/// Single global gate in front of every interaction handler.
///
/// The flag is read at call time, so a toggle applies to the very next event without
/// re-registering anything.
#[derive(Clone, Copy, Debug)]
pub(super) struct EventGuard {
    enabled: bool,
}

impl EventGuard {
    pub(super) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(super) fn enabled(self) -> bool {
        self.enabled
    }

    /// Returns `true` if the gate actually changed.
    pub(super) fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        changed
    }

    /// Run `handler` only while enabled.
    pub(super) fn run<R>(self, channel: Channel, handler: impl FnOnce() -> R) -> Option<R> {
        if !self.enabled {
            log::trace!("guard: dropped {} while disabled", channel.event_type());
            return None;
        }
        Some(handler())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_guard_never_runs_handler() {
        let guard = EventGuard::new(false);
        let mut calls = 0;
        for channel in Channel::ALL {
            assert!(guard.run(channel, || calls += 1).is_none());
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn toggle_applies_immediately() {
        let mut guard = EventGuard::new(true);
        assert_eq!(guard.run(Channel::Select, || 1), Some(1));
        assert!(guard.set_enabled(false));
        assert_eq!(guard.run(Channel::Select, || 2), None);
        assert!(!guard.set_enabled(false));
        guard.set_enabled(true);
        assert_eq!(guard.run(Channel::Select, || 3), Some(3));
    }
}
