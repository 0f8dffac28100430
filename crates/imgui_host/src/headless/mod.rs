//! In-memory collaborators
//!
//! [`HeadlessHost`], [`HeadlessBackendFactory`] and [`HeadlessGuiFactory`]
//! implement the host, backend and library traits without any windowing
//! system or GPU. They drive the test suite and the demo binary, and record
//! enough of what happened to assert on.

pub mod backend;
pub mod gui;
pub mod host;

pub use backend::{BackendStats, HeadlessBackend, HeadlessBackendFactory};
pub use gui::{GuiScript, HeadlessGui, HeadlessGuiFactory};
pub use host::HeadlessHost;

use crate::config::ContextConfig;
use crate::host::HostPlatform;
use crate::platform::Platform;
use std::rc::Rc;

/// Headless host, backend factory and library factory kept together
#[derive(Debug, Clone)]
pub struct Headless {
    /// Simulated host
    pub host: Rc<HeadlessHost>,
    /// Recording backends
    pub backends: Rc<HeadlessBackendFactory>,
    /// Scripted library contexts
    pub gui: Rc<HeadlessGuiFactory>,
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}

impl Headless {
    /// Collaborators for the compile target
    pub fn new() -> Self {
        Self::with_platform(HostPlatform::current())
    }

    /// Collaborators behaving like `platform`
    pub fn with_platform(platform: HostPlatform) -> Self {
        Self {
            host: HeadlessHost::with_platform(platform),
            backends: Rc::new(HeadlessBackendFactory::default()),
            gui: Rc::new(HeadlessGuiFactory::new()),
        }
    }

    /// Bundle for [`crate::Window::open`] with the default configuration
    pub fn platform(&self) -> Platform {
        self.platform_with(ContextConfig::default())
    }

    /// Bundle for [`crate::Window::open`] with `config`
    pub fn platform_with(&self, config: ContextConfig) -> Platform {
        Platform::new(self.host.clone(), self.backends.clone(), self.gui.clone())
            .with_config(config)
    }
}
