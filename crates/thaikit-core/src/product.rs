//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to define its identity, where the bundled
//! component sources live, and what to tell the user once scaffolding is done.

use crate::options::ScaffoldOptions;
use crate::project::ProjectProfile;
use std::path::{Path, PathBuf};

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Location of the bundled component sources when nothing overrides it
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after scaffolding
    fn next_steps(
        &self,
        dir: &Path,
        profile: &ProjectProfile,
        options: &ScaffoldOptions,
    ) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Resolve the template directory: explicit flag, then env var, then default
    fn template_dir(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var_os(self.template_dir_env()) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => self.default_template_dir(),
        }
    }
}
