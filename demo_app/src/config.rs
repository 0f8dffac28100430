//! Demo configuration

use imgui_host::config::{Config, ContextConfig};
use imgui_host::HostPlatform;
use serde::{Deserialize, Serialize};

/// One window to open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Ticks during which the demo keeps drawing the window
    pub frames: u32,
}

/// Whole demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Host flavor to simulate
    pub platform: HostPlatform,
    /// Watchdog ticks to run
    pub ticks: u32,
    pub context: ContextConfig,
    pub windows: Vec<WindowConfig>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            platform: HostPlatform::current(),
            ticks: 4,
            context: ContextConfig::default(),
            windows: vec![WindowConfig {
                title: "Demo".to_string(),
                x: 0,
                y: 0,
                width: 400,
                height: 300,
                frames: 3,
            }],
        }
    }
}

impl Config for DemoConfig {}
