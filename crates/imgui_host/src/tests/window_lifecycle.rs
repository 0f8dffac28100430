//! Window construction, frame state machine, heartbeat and teardown

use super::{end_frame, enter_frame, in_frame, native, open};
use crate::color::Color;
use crate::config::ContextConfig;
use crate::error::WindowError;
use crate::gui::{font_atlas, BackendFlags};
use crate::headless::Headless;
use crate::host::{Host, HostPlatform, Rect, ThemeColor};
use crate::resource::ResourceHandle;
use crate::watchdog::Watchdog;
use crate::window::{self, Message, MessageResult, Window, WindowId};
use approx::assert_relative_eq;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_destroy_window() {
        let headless = Headless::new();
        let id = open(&headless, "Test");
        assert!(Window::exists(id));
        assert_eq!(Window::count(), 1);

        let handle = native(id);
        assert!(headless.host.is_window(handle));
        assert!(headless.host.has_accelerator(handle));
        assert_eq!(Window::find(handle), Some(id));

        headless.host.destroy_window(handle);
        assert!(!Window::exists(id));
        assert_eq!(Window::count(), 0);
        assert!(!headless.host.is_window(handle));
        assert!(!headless.host.has_accelerator(handle));
        assert_eq!(Window::find(handle), None);
    }

    #[test]
    fn test_close_asks_host_to_destroy() {
        let headless = Headless::new();
        let id = open(&headless, "Closing");

        assert!(Window::close(id));
        assert!(!Window::exists(id));
        assert_eq!(headless.host.window_count(), 0);
        assert!(!Window::close(id));
    }

    #[test]
    fn test_frame_state_transitions() {
        let headless = Headless::new();
        let id = open(&headless, "Frames");
        assert!(!in_frame(id));

        enter_frame(id);
        assert!(in_frame(id));

        // entering again keeps the same frame
        enter_frame(id);
        assert_eq!(headless.backends.stats().frames_begun, 1);

        end_frame(id, true);
        assert!(!in_frame(id));
        let stats = headless.backends.stats();
        assert_eq!(stats.frames_presented, 1);
        assert_eq!(stats.frames_ended, 1);
        assert_eq!(stats.last_vertex_count, 4);

        // ending an idle window does nothing
        end_frame(id, true);
        assert_eq!(headless.backends.stats().frames_ended, 1);

        Window::close(id);
    }

    #[test]
    fn test_end_frame_without_render_discards() {
        let headless = Headless::new();
        let id = open(&headless, "Discard");

        enter_frame(id);
        end_frame(id, false);

        let stats = headless.backends.stats();
        assert_eq!(stats.frames_presented, 0);
        assert_eq!(stats.frames_ended, 1);
        assert_eq!(headless.gui.script().rendered, 0);

        Window::close(id);
    }

    #[test]
    fn test_frame_info_comes_from_host_and_backend() {
        let headless = Headless::new();
        let id = Window::open(&headless.platform(), "Info", 10, 20, 640, 480).unwrap();

        let io = enter_frame(id);
        assert_relative_eq!(io.display_size.x, 640.0);
        assert_relative_eq!(io.display_size.y, 480.0);
        assert_relative_eq!(io.display_framebuffer_scale.x, 1.0);
        assert!(io.delta_time > 0.0);

        Window::close(id);
    }

    #[test]
    fn test_heartbeat_presents_open_frame() {
        let headless = Headless::new();
        let id = open(&headless, "Stalled");

        enter_frame(id);
        Window::heartbeat();

        assert!(Window::exists(id));
        assert!(!in_frame(id));
        assert_eq!(headless.backends.stats().frames_presented, 1);

        Window::close(id);
    }

    #[test]
    fn test_driven_window_survives_heartbeats() {
        let headless = Headless::new();
        let id = open(&headless, "Driven");

        for _ in 0..5 {
            enter_frame(id);
            Window::heartbeat();
            assert!(Window::exists(id));
        }
        assert_eq!(headless.backends.stats().frames_presented, 5);

        Window::close(id);
    }

    #[test]
    fn test_idle_window_is_retired() {
        let headless = Headless::new();
        let id = open(&headless, "Idle");

        // a new window survives the tick before its first frame
        Window::heartbeat();
        assert!(Window::exists(id));

        Window::heartbeat();
        assert!(!Window::exists(id));
        assert_eq!(headless.host.window_count(), 0);
    }

    #[test]
    fn test_close_request_destroys_on_heartbeat() {
        let headless = Headless::new();
        let id = open(&headless, "Close me");
        let handle = native(id);

        assert_eq!(headless.host.send(handle, &Message::Close), MessageResult::Handled);
        assert!(Window::with(id, |window| window.is_close_requested()).unwrap());
        assert!(Window::exists(id));

        enter_frame(id);
        Window::heartbeat();

        assert!(!Window::exists(id));
        let stats = headless.backends.stats();
        assert_eq!(stats.frames_presented, 0);
        assert_eq!(stats.frames_ended, 1);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_no_window_left_in_frame_with_close_request() {
        let headless = Headless::new();
        let ids: Vec<WindowId> = (0..4).map(|index| open(&headless, &format!("W{index}"))).collect();

        enter_frame(ids[0]);
        enter_frame(ids[1]);
        Window::with(ids[1], Window::request_close);
        Window::with(ids[2], Window::request_close);

        Window::heartbeat();

        for id in Window::all() {
            let (in_frame, close_requested) =
                Window::with(id, |window| (window.is_in_frame(), window.is_close_requested())).unwrap();
            assert!(!(in_frame && close_requested));
        }
        assert!(Window::exists(ids[0]));
        assert!(!Window::exists(ids[1]));
        assert!(!Window::exists(ids[2]));
        assert!(Window::exists(ids[3]));

        for id in Window::all() {
            Window::close(id);
        }
    }

    #[test]
    fn test_teardown_discards_open_frame() {
        let headless = Headless::new();
        let id = open(&headless, "Teardown");

        enter_frame(id);
        Window::close(id);

        let stats = headless.backends.stats();
        assert_eq!(stats.frames_presented, 0);
        assert_eq!(stats.frames_ended, 1);
        assert_eq!(headless.gui.script().frames, 1);
    }

    #[test]
    fn test_backend_failure_rolls_back() {
        let headless = Headless::new();
        headless.backends.fail_creation(true);

        let result = Window::open(&headless.platform(), "Broken", 0, 0, 400, 300);
        assert!(matches!(result, Err(WindowError::Backend(_))));

        assert_eq!(Window::count(), 0);
        assert_eq!(headless.host.window_count(), 0);
        assert_eq!(headless.host.timer_count(), 0);
        assert!(!Watchdog::is_running());
        assert!(font_atlas::current().is_none());

        headless.backends.fail_creation(false);
        let id = open(&headless, "Working");
        assert_eq!(Window::count(), 1);
        Window::close(id);
    }

    #[test]
    #[should_panic(expected = "native window creation failed")]
    fn test_native_window_failure_is_fatal() {
        let headless = Headless::new();
        headless.host.refuse_windows(true);
        let _ = Window::open(&headless.platform(), "Nowhere", 0, 0, 400, 300);
    }

    #[test]
    fn test_raw_handles_are_revalidated() {
        let headless = Headless::new();
        let id = open(&headless, "Raw");
        let raw = id.to_raw();

        assert!(Window::exists(ResourceHandle::from_raw(raw)));
        Window::close(id);
        assert!(!Window::exists(ResourceHandle::from_raw(raw)));
        assert!(!Window::exists(ResourceHandle::from_raw(0)));
    }

    #[test]
    fn test_unknown_handle_dispatch_is_default() {
        let headless = Headless::new();
        let id = open(&headless, "Known");
        let stranger = crate::host::NativeHandle(9_999);

        assert_eq!(window::dispatch(stranger, &Message::Close), MessageResult::Default);
        assert!(!Window::with(id, |window| window.is_close_requested()).unwrap());

        Window::close(id);
    }

    #[test]
    fn test_dispatch_while_borrowed_falls_back() {
        let headless = Headless::new();
        let id = open(&headless, "Busy");
        let handle = native(id);

        let result = Window::with(id, |_| window::dispatch(handle, &Message::Close)).unwrap();
        assert_eq!(result, MessageResult::Default);

        Window::close(id);
    }

    #[test]
    fn test_destroy_while_borrowed_unregisters_window() {
        let headless = Headless::new();
        let id = open(&headless, "Vanishing");
        let handle = native(id);

        Window::with(id, |window| {
            window.enter_frame();
            headless.host.destroy_window(handle);
            assert!(!Window::exists(id));
        })
        .unwrap();

        assert!(!headless.host.is_window(handle));
        assert_eq!(Window::find(handle), None);
        assert_eq!(Window::count(), 0);
        assert_eq!(headless.backends.stats().dropped, 1);
        assert_eq!(headless.host.timer_count(), 0);
        assert!(!Watchdog::is_running());

        headless.host.run_timers();
        assert_eq!(Window::count(), 0);
    }

    #[test]
    fn test_open_near_coordinate_limits() {
        let headless = Headless::new();
        let id = Window::open(&headless.platform(), "Edge", i32::MAX - 10, 0, 400, 300).unwrap();

        let rect = Window::with(id, |window| window.rect()).unwrap();
        assert_eq!(rect.left, i32::MAX - 10);
        assert_eq!(rect.right, i32::MAX);
        assert_eq!(rect.width(), 10);

        let io = enter_frame(id);
        assert_relative_eq!(io.display_size.x, 10.0);
        assert_relative_eq!(io.display_size.y, 300.0);

        Window::close(id);
    }

    #[test]
    fn test_recovered_frame_errors_are_reported() {
        let headless = Headless::new();
        let id = open(&headless, "Sloppy");

        headless.gui.inject_error("Missing End()");
        enter_frame(id);
        end_frame(id, true);

        assert_eq!(headless.host.errors(), vec!["Missing End()".to_string()]);
        assert_eq!(headless.backends.stats().frames_presented, 1);
        assert!(Window::exists(id));

        Window::close(id);
    }

    #[test]
    fn test_context_setup() {
        let headless = Headless::with_platform(HostPlatform::Windows);
        let config = ContextConfig { platform_name: "host_test".to_string(), ..ContextConfig::default() };
        let id = Window::open(&headless.platform_with(config), "Setup", 0, 0, 400, 300).unwrap();

        Window::with(id, |window| {
            let io = window.io();
            assert_eq!(io.ini_filename, None);
            assert_eq!(io.backend_platform_name.as_deref(), Some("host_test"));
            assert!(io.backend_flags.contains(BackendFlags::HAS_MOUSE_CURSORS));
            assert!(!io.key_map.is_empty());
        });

        Window::close(id);
    }

    #[test]
    fn test_clear_color_seeded_from_theme() {
        let headless = Headless::with_platform(HostPlatform::Windows);
        headless.host.set_theme_color(ThemeColor::WindowBackground, 0x0033_2211);
        let id = open(&headless, "Themed");

        let expected = Color::unpack(0x0011_2233, false);
        assert_eq!(Window::with(id, |window| window.clear_color()), Some(expected));

        enter_frame(id);
        end_frame(id, true);
        assert_eq!(headless.backends.stats().last_clear_color, Some(expected));

        let custom = Color::new(0.5, 0.25, 0.0, 1.0);
        Window::with(id, |window| window.set_clear_color(custom));
        enter_frame(id);
        end_frame(id, true);
        assert_eq!(headless.backends.stats().last_clear_color, Some(custom));

        Window::close(id);
    }

    #[test]
    fn test_geometry_title_and_visibility() {
        let headless = Headless::new();
        let id = Window::open(&headless.platform(), "Before", 5, 6, 200, 100).unwrap();
        let handle = native(id);

        Window::with(id, |window| {
            assert_eq!(window.title(), "Before");
            assert_eq!(window.rect(), Rect::from_pos_size(5, 6, 200, 100));

            window.set_title("After");
            window.set_rect(Rect::from_pos_size(0, 0, 300, 150));
            window.set_visible(false);
            assert_eq!(window.title(), "After");
        });

        assert_eq!(headless.host.window_text(handle), "After");
        assert_eq!(headless.host.client_size(handle), (300, 150));
        assert!(!headless.host.is_visible(handle));

        Window::close(id);
    }
}
