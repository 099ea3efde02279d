//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::OutlineService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::OutlineBuilder;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Outline parsing and reconciliation
    pub outline: OutlineService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// Fails when the configured heading patterns or separators are invalid.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> ApplicationResult<Self> {
        let builder = OutlineBuilder::new(settings.heading_patterns()?, settings.key_separators()?);
        let outline = OutlineService::with_builder(Arc::clone(&fs), builder, settings.indent.clone());
        let settings = Arc::new(settings);

        Ok(Self {
            settings,
            fs,
            outline,
        })
    }
}
