//! Headless demo of the window frame lifecycle
//!
//! Opens the configured windows on the in-memory host, drives some of them
//! for a number of ticks while replaying a bit of input, and lets the
//! watchdog present their frames and retire the ones that stop drawing.
//!
//! Usage: `imgui_host_demo [config.toml|config.ron]`

mod config;

use config::DemoConfig;
use imgui_host::foundation::logging;
use imgui_host::gui::MouseButton;
use imgui_host::headless::Headless;
use imgui_host::host::{vk, Point};
use imgui_host::prelude::*;
use imgui_host::ConfigError;
use thiserror::Error;

/// Demo failures
#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),
}

struct DemoWindow {
    id: WindowId,
    title: String,
    frames: u32,
}

fn load_config() -> Result<DemoConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading demo configuration from {}", path);
            DemoConfig::load_from_file(&path)
        }
        None => {
            log::info!("No configuration given, using defaults");
            Ok(DemoConfig::default())
        }
    }
}

fn open_windows(headless: &Headless, config: &DemoConfig) -> Result<Vec<DemoWindow>, WindowError> {
    let platform = headless.platform_with(config.context.clone());

    config
        .windows
        .iter()
        .map(|window| -> Result<DemoWindow, WindowError> {
            let id = Window::open(&platform, &window.title, window.x, window.y, window.width, window.height)?;
            Ok(DemoWindow { id, title: window.title.clone(), frames: window.frames })
        })
        .collect()
}

/// Feed the input a user would produce over the first window
fn replay_input(headless: &Headless, window: &DemoWindow, tick: u32) {
    let Some(native) = Window::with(window.id, |window| window.native()) else {
        return;
    };
    let rect = headless.host.window_rect(native);
    headless.host.set_cursor_pos(Point::new(rect.left + 20, rect.top + 20));

    match tick {
        0 => {
            // a click shorter than one frame
            headless.host.send(native, &Message::ButtonDown(MouseButton::Left));
            headless.host.send(native, &Message::ButtonUp(MouseButton::Left));
        }
        1 => {
            headless.host.send(native, &Message::MouseWheel { axis: WheelAxis::Vertical, delta: -120 });
        }
        2 => {
            headless.host.set_key(vk::SHIFT, true);
            for character in "Hi!".chars() {
                headless.host.send(native, &Message::Char(u32::from(character)));
            }
        }
        _ => headless.host.set_key(vk::SHIFT, false),
    }
}

fn run(config: &DemoConfig) -> Result<(), DemoError> {
    let headless = Headless::with_platform(config.platform);
    let windows = open_windows(&headless, config)?;
    log::info!("Opened {} windows on a {:?} host", windows.len(), config.platform);

    for tick in 0..config.ticks {
        if let Some(first) = windows.first() {
            replay_input(&headless, first, tick);
        }

        for window in windows.iter().filter(|window| tick < window.frames) {
            let io = Window::with(window.id, |window| {
                window.enter_frame();
                window.io().clone()
            });

            if let Some(io) = io {
                log::debug!(
                    "{} tick {}: mouse {:?} down {:?} wheel {} text {:?}",
                    window.title,
                    tick,
                    io.mouse_pos,
                    io.mouse_down,
                    io.mouse_wheel,
                    io.input_queue
                );
            }
        }

        headless.host.run_timers();
        log::info!("Tick {}: {} windows alive", tick, Window::count());
    }

    let stats = headless.backends.stats();
    log::info!(
        "Presented {} frames across {} backends, {} windows left",
        stats.frames_presented,
        stats.created,
        Window::count()
    );

    for window in &windows {
        Window::close(window.id);
    }

    Ok(())
}

fn main() {
    logging::init("info");

    let result = load_config().map_err(DemoError::from).and_then(|config| run(&config));

    if let Err(err) = result {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
