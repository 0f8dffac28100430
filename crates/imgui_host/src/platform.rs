//! Collaborators a window is created against

use crate::backend::BackendFactory;
use crate::config::ContextConfig;
use crate::gui::GuiFactory;
use crate::host::Host;
use std::rc::Rc;

/// Host, backend and library bundle passed to [`crate::Window::open`]
#[derive(Clone)]
pub struct Platform {
    /// Host services
    pub host: Rc<dyn Host>,
    /// Creates a renderer per window
    pub backends: Rc<dyn BackendFactory>,
    /// Creates a library context per window
    pub gui: Rc<dyn GuiFactory>,
    /// Context settings
    pub config: ContextConfig,
}

impl Platform {
    /// Bundle collaborators with the default configuration
    pub fn new(host: Rc<dyn Host>, backends: Rc<dyn BackendFactory>, gui: Rc<dyn GuiFactory>) -> Self {
        Self { host, backends, gui, config: ContextConfig::default() }
    }

    /// Replace the context configuration
    #[must_use]
    pub fn with_config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }
}
