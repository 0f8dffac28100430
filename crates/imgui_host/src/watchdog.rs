//! Watchdog timer that keeps every window making progress
//!
//! A host may stop delivering paint or input messages to a window, for
//! example while it is occluded or the user works in another window. The
//! library still needs each open frame to be completed or abandoned, and
//! windows nobody drives anymore must be retired. The watchdog registers a
//! recurring host timer whose tick heartbeats every registered resource.
//!
//! There is at most one watchdog per UI thread. Each window holds a strong
//! reference; the thread-wide slot only holds a weak one, so the timer is
//! unregistered as soon as the last window is gone.

use crate::host::{Host, TimerId};
use crate::resource;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

thread_local! {
    static INSTANCE: RefCell<Weak<Watchdog>> = RefCell::new(Weak::new());
}

/// Owner of the host timer registration
pub struct Watchdog {
    host: Rc<dyn Host>,
    timer: TimerId,
}

impl Watchdog {
    /// Promote the live watchdog, or start a new one on `host`
    pub fn get(host: &Rc<dyn Host>) -> Rc<Self> {
        INSTANCE.with(|slot| {
            if let Some(instance) = slot.borrow().upgrade() {
                return instance;
            }

            let instance = Rc::new(Self::start(Rc::clone(host)));
            *slot.borrow_mut() = Rc::downgrade(&instance);
            instance
        })
    }

    /// Whether a watchdog is currently alive on this thread
    pub fn is_running() -> bool {
        INSTANCE.with(|slot| slot.borrow().strong_count() > 0)
    }

    /// Timer callback handed to the host
    pub fn tick() {
        resource::heartbeat_all();
    }

    fn start(host: Rc<dyn Host>) -> Self {
        let timer = host.register_timer(Self::tick);
        log::debug!("Watchdog started (timer {:?})", timer);
        Self { host, timer }
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.host.unregister_timer(self.timer);
        log::debug!("Watchdog stopped (timer {:?})", self.timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;

    #[test]
    fn test_get_shares_single_instance() {
        let host = HeadlessHost::new();
        let dyn_host: Rc<dyn Host> = host.clone();

        let first = Watchdog::get(&dyn_host);
        let second = Watchdog::get(&dyn_host);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(host.timer_count(), 1);
        assert!(Watchdog::is_running());
    }

    #[test]
    fn test_timer_unregistered_with_last_reference() {
        let host = HeadlessHost::new();
        let dyn_host: Rc<dyn Host> = host.clone();

        let first = Watchdog::get(&dyn_host);
        let second = Watchdog::get(&dyn_host);
        drop(first);
        assert_eq!(host.timer_count(), 1);

        drop(second);
        assert_eq!(host.timer_count(), 0);
        assert!(!Watchdog::is_running());

        // a later request starts a new registration
        let _again = Watchdog::get(&dyn_host);
        assert_eq!(host.timer_count(), 1);
    }
}
