// crates/engine/src/platform.rs
//! Platform-specific lookup of the default destination directory.
//!
//! Keeps OS-dependent paths out of the sync and watch code, which only ever
//! see a resolved [`PathBuf`].

use crate::error::{EngineError, Result};
use std::path::PathBuf;

/// Capability: resolve the default destination directory for the current platform.
pub trait DestinationResolver {
    /// Returns `None` if the platform offers no suitable base directory.
    fn resolve(&self) -> Option<PathBuf>;
}

/// Aseprite's user scripts folder.
///
/// Windows keeps it under the roaming application data directory
/// (`%APPDATA%\Aseprite\scripts`); other platforms use the user
/// configuration directory (`~/.config/aseprite/scripts`,
/// `~/Library/Application Support/aseprite/scripts`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AsepriteScriptsResolver;

impl DestinationResolver for AsepriteScriptsResolver {
    fn resolve(&self) -> Option<PathBuf> {
        #[cfg(windows)]
        return dirs::data_dir().map(|base| base.join("Aseprite").join("scripts"));

        #[cfg(not(windows))]
        return dirs::config_dir().map(|base| base.join("aseprite").join("scripts"));
    }
}

/// Always resolves to the same path; used for explicit overrides and tests.
#[derive(Debug, Clone)]
pub struct FixedResolver(pub PathBuf);

impl DestinationResolver for FixedResolver {
    fn resolve(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Pick the explicit override if given, otherwise ask the resolver.
///
/// # Errors
/// Returns [`EngineError::NoDestination`] if there is no override and the
/// resolver has nothing to offer.
pub fn resolve_destination(
    explicit: Option<PathBuf>,
    resolver: &dyn DestinationResolver,
) -> Result<PathBuf> {
    explicit
        .or_else(|| resolver.resolve())
        .ok_or(EngineError::NoDestination)
}
