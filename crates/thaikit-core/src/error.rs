//! Fatal error taxonomy
//!
//! Only conditions that abort a run live here. Recoverable situations
//! (unparseable config files, failed installs, missing optional assets) are
//! reported as values so the pipeline can continue.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The bundled component tree is missing; the installation is broken.
    #[error("Component sources not found at {}. Reinstall thaikit or pass --template-dir.", .0.display())]
    MissingAssets(PathBuf),

    #[error("Kit manifest {} is invalid: {reason}", .path.display())]
    InvalidKitManifest { path: PathBuf, reason: String },

    #[error("Target directory does not exist: {}", .0.display())]
    MissingTarget(PathBuf),
}
