//! Font atlas and watchdog shared across window churn

use super::{enter_frame, native, open};
use crate::gui::{font_atlas, FontSource};
use crate::headless::Headless;
use crate::host::Host;
use crate::watchdog::Watchdog;
use crate::window::{Window, WindowId};
use std::rc::Rc;

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas_of(id: WindowId) -> font_atlas::SharedFontAtlas {
        Window::with(id, |window| Rc::clone(window.font_atlas())).unwrap()
    }

    #[test]
    fn test_windows_share_one_atlas() {
        let headless = Headless::new();
        let ids: Vec<WindowId> = (0..3).map(|index| open(&headless, &format!("Atlas {index}"))).collect();

        let first = atlas_of(ids[0]);
        for &id in &ids[1..] {
            assert!(Rc::ptr_eq(&first, &atlas_of(id)));
        }
        first.borrow_mut().add_font(FontSource::Default { size: 13.0 });
        assert_eq!(atlas_of(ids[2]).borrow().fonts().len(), 1);
        drop(first);

        for &id in &ids {
            assert!(font_atlas::current().is_some());
            Window::close(id);
        }
        assert!(font_atlas::current().is_none());
    }

    #[test]
    fn test_atlas_recreated_after_last_window() {
        let headless = Headless::new();
        let id = open(&headless, "First");
        atlas_of(id).borrow_mut().add_font(FontSource::Default { size: 16.0 });
        Window::close(id);

        let id = open(&headless, "Second");
        assert!(atlas_of(id).borrow().fonts().is_empty());
        Window::close(id);
    }

    #[test]
    fn test_watchdog_lives_as_long_as_windows() {
        let headless = Headless::new();
        assert!(!Watchdog::is_running());

        let first = open(&headless, "One");
        let second = open(&headless, "Two");
        assert!(Watchdog::is_running());
        assert_eq!(headless.host.timer_count(), 1);

        Window::close(first);
        assert_eq!(headless.host.timer_count(), 1);

        Window::close(second);
        assert_eq!(headless.host.timer_count(), 0);
        assert!(!Watchdog::is_running());
    }

    #[test]
    fn test_timer_tick_completes_frames() {
        let headless = Headless::new();
        let id = open(&headless, "Ticking");

        enter_frame(id);
        headless.host.run_timers();

        assert!(Window::with(id, |window| !window.is_in_frame()).unwrap());
        assert_eq!(headless.backends.stats().frames_presented, 1);

        Window::close(id);
    }

    #[test]
    fn test_timer_tick_retires_abandoned_windows() {
        let headless = Headless::new();
        let driven = open(&headless, "Driven");
        let abandoned = open(&headless, "Abandoned");
        let abandoned_handle = native(abandoned);

        for _ in 0..3 {
            enter_frame(driven);
            headless.host.run_timers();
        }

        assert!(Window::exists(driven));
        assert!(!Window::exists(abandoned));
        assert!(!headless.host.is_window(abandoned_handle));
        assert_eq!(Window::count(), 1);

        // the last retirement also stops the timer
        headless.host.run_timers();
        headless.host.run_timers();
        assert_eq!(Window::count(), 0);
        assert_eq!(headless.host.timer_count(), 0);
        assert_eq!(headless.host.window_count(), 0);
    }

    #[test]
    fn test_destroy_from_host_during_frame() {
        let headless = Headless::new();
        let id = open(&headless, "Yanked");
        let handle = native(id);

        enter_frame(id);
        headless.host.destroy_window(handle);

        assert!(!Window::exists(id));
        assert_eq!(headless.backends.stats().dropped, 1);
        assert_eq!(headless.gui.script().frames, 1);
        assert_eq!(headless.gui.script().contexts, 1);
    }
}
