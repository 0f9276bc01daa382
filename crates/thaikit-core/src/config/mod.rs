//! Additive patching of the target project's configuration files
//!
//! Every merge only adds what is missing. Files that cannot be parsed or
//! recognized are left alone and reported back so the user can fix them by
//! hand.

pub mod framework;
pub mod json;
pub mod tailwind;

pub use framework::merge_framework_config;
pub use json::{merge_jsx_setting, ConfigDocument, ResolutionConfig};
pub use tailwind::{ensure_css_import, ensure_postcss_config, postcss_config_path};

use std::fmt;

/// What a merge did to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Updated,
    AlreadyConfigured,
    /// Left untouched because it could not be handled safely
    Skipped { reason: String },
    /// The file exists but has no shape we can patch; `instructions` says what to add
    ManualStepRequired { instructions: String },
}

impl MergeOutcome {
    pub fn wrote_file(&self) -> bool {
        matches!(self, MergeOutcome::Created | MergeOutcome::Updated)
    }

    /// Outcomes the user should look at
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            MergeOutcome::Skipped { .. } | MergeOutcome::ManualStepRequired { .. }
        )
    }
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeOutcome::Created => write!(f, "created"),
            MergeOutcome::Updated => write!(f, "updated"),
            MergeOutcome::AlreadyConfigured => write!(f, "already configured"),
            MergeOutcome::Skipped { reason } => write!(f, "skipped ({})", reason),
            MergeOutcome::ManualStepRequired { instructions } => {
                write!(f, "manual step required:\n{}", instructions)
            }
        }
    }
}
