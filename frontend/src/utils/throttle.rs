use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    Run,
    /// Schedule a trailing attempt after this many milliseconds.
    Defer(u32),
}

/// Leading-edge throttle with a single trailing call.
///
/// The first call runs immediately. Later calls push out one pending trailing
/// attempt, which only runs if `limit` has elapsed since the last run.
#[derive(Debug)]
pub struct ThrottleGate {
    limit: f64,
    last_ran: Option<f64>,
}

impl ThrottleGate {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit: f64::from(limit_ms),
            last_ran: None,
        }
    }

    pub fn call(&mut self, now: f64) -> Gate {
        match self.last_ran {
            None => {
                self.last_ran = Some(now);
                Gate::Run
            }
            Some(last) => {
                let wait = (self.limit - (now - last)).max(0.0);
                Gate::Defer(wait.ceil() as u32)
            }
        }
    }

    /// Called when the trailing timer fires; returns whether to run.
    pub fn fire(&mut self, now: f64) -> bool {
        match self.last_ran {
            Some(last) if now - last < self.limit => false,
            _ => {
                self.last_ran = Some(now);
                true
            }
        }
    }
}

/// Wraps `f` so that it runs at most once per `limit_ms`, plus a trailing call.
pub fn throttle<F>(limit_ms: u32, f: F) -> impl FnMut()
where
    F: FnMut() + 'static,
{
    let gate = Rc::new(RefCell::new(ThrottleGate::new(limit_ms)));
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let f = Rc::new(RefCell::new(f));

    move || {
        let decision = gate.borrow_mut().call(js_sys::Date::now());
        match decision {
            Gate::Run => (*f.borrow_mut())(),
            Gate::Defer(wait) => {
                let gate = gate.clone();
                let f = f.clone();
                // Replacing the handle drops, and so cancels, the previous trailing call.
                *pending.borrow_mut() = Some(Timeout::new(wait, move || {
                    if gate.borrow_mut().fire(js_sys::Date::now()) {
                        (*f.borrow_mut())();
                    }
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_runs_immediately() {
        let mut gate = ThrottleGate::new(100);
        assert_eq!(gate.call(1_000.0), Gate::Run);
    }

    #[test]
    fn calls_inside_window_are_deferred_to_its_end() {
        let mut gate = ThrottleGate::new(100);
        gate.call(1_000.0);
        assert_eq!(gate.call(1_030.0), Gate::Defer(70));
        assert_eq!(gate.call(1_099.5), Gate::Defer(1));
    }

    #[test]
    fn late_call_defers_with_zero_wait() {
        let mut gate = ThrottleGate::new(100);
        gate.call(1_000.0);
        assert_eq!(gate.call(1_500.0), Gate::Defer(0));
    }

    #[test]
    fn trailing_fire_respects_limit() {
        let mut gate = ThrottleGate::new(100);
        gate.call(1_000.0);
        assert!(!gate.fire(1_050.0));
        assert!(gate.fire(1_100.0));
        // The trailing run restarts the window.
        assert!(!gate.fire(1_150.0));
        assert!(gate.fire(1_200.0));
    }
}
