//! Server state.

use std::sync::Arc;

use invex_core::{InvexConfig, InvoicePipeline, LayoutProfile};

/// Shared application state.
///
/// Only the immutable configuration is shared; every request builds its own
/// pipeline.
#[derive(Clone, Default)]
pub struct AppState {
    pub config: Arc<InvexConfig>,
}

impl AppState {
    pub fn new(config: InvexConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Profile used when a request does not name one.
    pub fn default_profile(&self) -> LayoutProfile {
        self.config.extraction.profile
    }

    /// Pipeline for one request.
    pub fn pipeline(&self, profile: Option<LayoutProfile>) -> InvoicePipeline {
        let mut extraction = self.config.extraction.clone();
        if let Some(profile) = profile {
            extraction.profile = profile;
        }
        InvoicePipeline::from_config(&extraction)
    }
}
