//! Recurring tick schedule for one widget instance.

/// Lifecycle of an instance's recurring tick schedule.
///
/// `Stopped` is terminal: it is entered when the target instant passes or
/// the instance is torn down, and a stopped timer never resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Created but not yet activated
    #[default]
    Idle,
    /// Recurring tick schedule active
    Running,
    /// Cancelled; terminal
    Stopped,
}

/// Deadline-based recurring timer polled by the runtime's event loop.
///
/// Activation makes the first tick due immediately; each consumed tick
/// schedules the next one a full period later.
#[derive(Debug, Clone)]
pub struct TickTimer {
    state: TimerState,
    period_ms: i64,
    next_due_ms: i64,
}

impl TickTimer {
    /// Creates an idle timer with the given period.
    #[must_use]
    pub const fn new(period_ms: i64) -> Self {
        Self {
            state: TimerState::Idle,
            period_ms,
            next_due_ms: 0,
        }
    }

    /// Starts the schedule with an immediate first tick.
    ///
    /// Only an idle timer activates; a stopped timer stays stopped.
    pub fn activate(&mut self, now_ms: i64) {
        if self.state == TimerState::Idle {
            self.state = TimerState::Running;
            self.next_due_ms = now_ms;
        }
    }

    /// Consumes a due tick, if any, and schedules the next one.
    ///
    /// Returns true when the caller should run tick work now.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        if self.state != TimerState::Running || now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = now_ms + self.period_ms;
        true
    }

    /// Cancels the schedule. Terminal; the timer never ticks again.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Returns true while the recurring schedule is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: i64 = 1000;

    #[test]
    fn test_idle_never_ticks() {
        let mut timer = TickTimer::new(PERIOD);
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(!timer.poll(0));
        assert!(!timer.poll(10_000));
    }

    #[test]
    fn test_activation_ticks_immediately() {
        let mut timer = TickTimer::new(PERIOD);
        timer.activate(5_000);
        assert!(timer.is_running());
        assert!(timer.poll(5_000));
        // Consumed; not due again until a full period elapses
        assert!(!timer.poll(5_000));
        assert!(!timer.poll(5_999));
        assert!(timer.poll(6_000));
    }

    #[test]
    fn test_cadence_over_time() {
        let mut timer = TickTimer::new(PERIOD);
        timer.activate(0);

        let mut ticks = 0;
        for now in (0..=5_000).step_by(100) {
            if timer.poll(now) {
                ticks += 1;
            }
        }
        // t = 0, 1000, 2000, 3000, 4000, 5000
        assert_eq!(ticks, 6);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut timer = TickTimer::new(PERIOD);
        timer.activate(0);
        assert!(timer.poll(0));

        timer.stop();
        assert_eq!(timer.state(), TimerState::Stopped);
        assert!(!timer.poll(1_000));
        assert!(!timer.poll(100_000));

        // A stopped timer never re-activates
        timer.activate(200_000);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert!(!timer.poll(200_000));
    }

    #[test]
    fn test_late_poll_catches_single_tick() {
        let mut timer = TickTimer::new(PERIOD);
        timer.activate(0);
        assert!(timer.poll(0));

        // A long gap yields one tick, then the schedule resumes from now
        assert!(timer.poll(10_500));
        assert!(!timer.poll(10_600));
        assert!(timer.poll(11_500));
    }
}
