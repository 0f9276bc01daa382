//! Filesystem side of a scaffolding run
//!
//! `apply` performs every mutation once options are frozen and the user has
//! confirmed: asset copy, module-resolution config, build config and
//! Tailwind wiring. It never prompts, so it runs the same under the TUI and
//! in tests.

use crate::assets::{self, MaterializePlan, MaterializeReport, TypeStripper, CATEGORIES};
use crate::config::{self, MergeOutcome, ResolutionConfig};
use crate::options::{Language, ScaffoldOptions};
use crate::project::ProjectProfile;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Process-level inputs, passed explicitly instead of read from the environment
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    /// Project being scaffolded into
    pub target_dir: PathBuf,
    /// Root of the bundled kit (contains `kit.yaml` and `src/`)
    pub kit_root: PathBuf,
}

impl ScaffoldContext {
    pub fn new(target_dir: impl Into<PathBuf>, kit_root: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            kit_root: kit_root.into(),
        }
    }
}

/// Outcome of merging one config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
    pub path: PathBuf,
    pub outcome: MergeOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    pub assets: MaterializeReport,
    pub configs: Vec<ConfigChange>,
}

impl ScaffoldReport {
    pub fn config(&self, path: &Path) -> Option<&MergeOutcome> {
        self.configs
            .iter()
            .find(|c| c.path == path)
            .map(|c| &c.outcome)
    }
}

/// Copy assets and patch configuration for a confirmed run
pub async fn apply(
    ctx: &ScaffoldContext,
    profile: &ProjectProfile,
    options: &ScaffoldOptions,
) -> Result<ScaffoldReport> {
    let sources = assets::sources_root(&ctx.kit_root)?;
    let plan = MaterializePlan::new(sources, profile);

    let stripper = match options.language {
        Language::JavaScript => Some(TypeStripper::new()?),
        Language::TypeScript => None,
    };
    let transform = stripper
        .as_ref()
        .map(|s| s as &dyn assets::SourceTransform);

    let assets = assets::materialize(&plan, CATEGORIES, options, transform).await?;

    let mut configs = Vec::new();

    let resolution_path = profile.root.join(options.language.resolution_config());
    let resolution = ResolutionConfig::for_project(profile, options.language);
    configs.push(ConfigChange {
        outcome: config::merge_jsx_setting(&resolution_path, &resolution)?,
        path: resolution_path,
    });

    if let Some(build_path) = profile.build_config_path(options.language) {
        configs.push(ConfigChange {
            outcome: config::merge_framework_config(&build_path, profile)?,
            path: build_path,
        });
    }

    let css_entry = profile.css_entry();
    configs.push(ConfigChange {
        outcome: config::ensure_css_import(&css_entry)?,
        path: css_entry,
    });

    let postcss_outcome = config::ensure_postcss_config(&profile.root)?;
    configs.push(ConfigChange {
        outcome: postcss_outcome,
        path: config::postcss_config_path(&profile.root),
    });

    Ok(ScaffoldReport { assets, configs })
}
