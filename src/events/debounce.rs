/// Identifies one scheduled (not yet fired) debounced call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

#[derive(Clone, Debug)]
struct Pending<T> {
    token: TimerToken,
    deadline: f64,
    value: T,
}

/// Trailing debounce with an explicit timer token.
///
/// Every [`Self::call`] cancels the pending token and schedules a new one; intermediate values
/// are discarded, not queued. Latest wins.
#[derive(Clone, Debug)]
pub(super) struct Debouncer<T> {
    window: f64,
    next_token: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub(super) fn new(window: f64) -> Self {
        Self {
            window: window.max(0.0),
            next_token: 1,
            pending: None,
        }
    }

    pub(super) fn call(&mut self, time: f64, value: T) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.saturating_add(1);
        if let Some(old) = self.pending.replace(Pending {
            token,
            deadline: time + self.window,
            value,
        }) {
            log::trace!("debounce: token {:?} superseded by {token:?}", old.token);
        }
        token
    }

    /// Take the pending value if its deadline has passed.
    pub(super) fn poll(&mut self, time: f64) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| time >= p.deadline) {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    pub(super) fn cancel(&mut self) -> Option<TimerToken> {
        self.pending.take().map(|p| p.token)
    }

    pub(super) fn pending_token(&self) -> Option<TimerToken> {
        self.pending.as_ref().map(|p| p.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_last_value() {
        let mut d = Debouncer::new(0.001);
        d.call(0.0, "a");
        d.call(0.0002, "b");
        d.call(0.0004, "c");
        assert_eq!(d.poll(0.0010), None, "window restarts on every call");
        assert_eq!(d.poll(0.002), Some("c"));
        assert_eq!(d.poll(1.0), None);
    }

    #[test]
    fn new_call_replaces_token() {
        let mut d = Debouncer::new(0.001);
        let first = d.call(0.0, 1);
        let second = d.call(0.0, 2);
        assert_ne!(first, second);
        assert_eq!(d.pending_token(), Some(second));
        assert_eq!(d.cancel(), Some(second));
        assert_eq!(d.poll(10.0), None);
    }
}
