//! Tailwind wiring: the CSS entry import and the PostCSS config

use super::MergeOutcome;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const TAILWIND_IMPORT: &str = "@import \"tailwindcss\";";

const POSTCSS_FILE: &str = "postcss.config.mjs";

/// Any of these means PostCSS is already configured
const POSTCSS_CONFIGS: &[&str] = &[
    "postcss.config.js",
    "postcss.config.mjs",
    "postcss.config.cjs",
    "postcss.config.ts",
    ".postcssrc",
    ".postcssrc.json",
];

const POSTCSS_TEMPLATE: &str = r#"const config = {
  plugins: {
    "@tailwindcss/postcss": {},
  },
};

export default config;
"#;

fn imports_tailwind(css: &str) -> bool {
    css.lines().map(str::trim).any(|line| {
        (line.starts_with("@import") && line.contains("tailwindcss"))
            || line.starts_with("@tailwind ")
    })
}

/// Prefix the CSS entry with the Tailwind import, creating the file if needed
pub fn ensure_css_import(path: &Path) -> Result<MergeOutcome> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, format!("{}\n", TAILWIND_IMPORT))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(MergeOutcome::Created);
    }

    let css = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if imports_tailwind(&css) {
        return Ok(MergeOutcome::AlreadyConfigured);
    }

    // @charset has to stay the very first statement
    let patched = match css.split_once('\n') {
        Some((first, rest)) if first.trim_start().starts_with("@charset") => {
            format!("{}\n{}\n{}", first, TAILWIND_IMPORT, rest)
        }
        _ => format!("{}\n{}", TAILWIND_IMPORT, css),
    };
    std::fs::write(path, patched).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(MergeOutcome::Updated)
}

/// The PostCSS config in use, or the one that would be created
pub fn postcss_config_path(root: &Path) -> PathBuf {
    POSTCSS_CONFIGS
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
        .unwrap_or_else(|| root.join(POSTCSS_FILE))
}

/// Create `postcss.config.mjs` unless some PostCSS config already exists
pub fn ensure_postcss_config(root: &Path) -> Result<MergeOutcome> {
    if POSTCSS_CONFIGS.iter().any(|name| root.join(name).is_file()) {
        return Ok(MergeOutcome::AlreadyConfigured);
    }

    let path = root.join(POSTCSS_FILE);
    std::fs::write(&path, POSTCSS_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(MergeOutcome::Created)
}
