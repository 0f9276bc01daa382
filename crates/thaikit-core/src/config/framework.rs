//! Build-tool config patching (`vite.config.*`, `next.config.*`)
//!
//! These are source files, not data, so the merge is a regex insertion right
//! after a recognized object-literal opening. Anything unrecognized gets
//! manual instructions instead of a guess.

use super::MergeOutcome;
use crate::project::{ProjectKind, ProjectProfile};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// One entry to insert into a build config
struct BuildConfigPatch {
    /// Matches when the required setting is already in place
    configured: &'static str,
    /// Key that, when present without the setting, has to be edited by hand
    existing_key: &'static str,
    /// What to change inside an existing `existing_key` value
    existing_key_instructions: &'static str,
    /// Property inserted into the config object
    entry: &'static str,
    /// Object-literal openings, tried in order
    openings: &'static [&'static str],
}

const VITE_PATCH: BuildConfigPatch = BuildConfigPatch {
    configured: r#"["']@["']\s*:|find\s*:\s*["']@["']"#,
    existing_key: r"\bresolve\s*:",
    existing_key_instructions: r#"add `"@": "/src"` to `resolve.alias`"#,
    entry: r#"resolve: { alias: { "@": "/src" } },"#,
    openings: &[r"defineConfig\(\s*\{", r"export\s+default\s*\{"],
};

const NEXT_PATCH: BuildConfigPatch = BuildConfigPatch {
    configured: r#"transpilePackages\s*:\s*\[[^\]]*["']antd["']"#,
    existing_key: r"\btranspilePackages\s*:",
    existing_key_instructions: r#"add "antd" and "@ant-design/icons" to `transpilePackages`"#,
    entry: r#"transpilePackages: ["antd", "@ant-design/icons"],"#,
    openings: &[
        r"const\s+nextConfig\s*(?::\s*[\w.]+\s*)?=\s*\{",
        r"module\.exports\s*=\s*\{",
        r"export\s+default\s*\{",
    ],
};

const VITE_TEMPLATE: &str = r#"import { defineConfig } from "vite";
import react from "@vitejs/plugin-react";

export default defineConfig({
  plugins: [react()],
  resolve: { alias: { "@": "/src" } },
});
"#;

const NEXT_TEMPLATE_JS: &str = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  transpilePackages: ["antd", "@ant-design/icons"],
};

export default nextConfig;
"#;

const NEXT_TEMPLATE_TS: &str = r#"import type { NextConfig } from "next";

const nextConfig: NextConfig = {
  transpilePackages: ["antd", "@ant-design/icons"],
};

export default nextConfig;
"#;

impl BuildConfigPatch {
    fn matches(pattern: &str, source: &str) -> Result<bool> {
        let re = Regex::new(pattern).context("Invalid build config pattern")?;
        Ok(re.is_match(source))
    }

    fn for_kind(kind: ProjectKind) -> Option<&'static BuildConfigPatch> {
        match kind {
            ProjectKind::NextAppRouter | ProjectKind::NextPagesRouter => Some(&NEXT_PATCH),
            ProjectKind::Vite => Some(&VITE_PATCH),
            ProjectKind::React => None,
        }
    }

    /// Insert the entry after the first recognized opening
    fn apply(&self, source: &str) -> Result<Option<String>> {
        for opening in self.openings {
            let re = Regex::new(opening).context("Invalid build config pattern")?;
            if let Some(m) = re.find(source) {
                let indent = indent_after(&source[m.end()..]);
                let mut out = String::with_capacity(source.len() + self.entry.len() + 8);
                out.push_str(&source[..m.end()]);
                out.push('\n');
                out.push_str(&indent);
                out.push_str(self.entry);
                out.push_str(&source[m.end()..]);
                return Ok(Some(out));
            }
        }
        Ok(None)
    }
}

/// Indentation of the first non-empty line following an opening brace, two spaces if none
fn indent_after(rest: &str) -> String {
    rest.lines()
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            let trimmed = line.trim_start();
            line[..line.len() - trimmed.len()].to_string()
        })
        .filter(|indent| !indent.is_empty())
        .unwrap_or_else(|| "  ".to_string())
}

fn template_for(path: &Path, kind: ProjectKind) -> &'static str {
    if kind == ProjectKind::Vite {
        return VITE_TEMPLATE;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("ts") => NEXT_TEMPLATE_TS,
        _ => NEXT_TEMPLATE_JS,
    }
}

/// Add the framework-specific entry to the build config at `path`, creating the file if absent
pub fn merge_framework_config(path: &Path, profile: &ProjectProfile) -> Result<MergeOutcome> {
    let Some(patch) = BuildConfigPatch::for_kind(profile.kind) else {
        return Ok(MergeOutcome::Skipped {
            reason: format!("{} projects have no build config to patch", profile.kind),
        });
    };

    if !path.exists() {
        std::fs::write(path, template_for(path, profile.kind))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(MergeOutcome::Created);
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if BuildConfigPatch::matches(patch.configured, &source)? {
        return Ok(MergeOutcome::AlreadyConfigured);
    }

    // A second key would shadow or be shadowed by the existing one
    if BuildConfigPatch::matches(patch.existing_key, &source)? {
        return Ok(MergeOutcome::ManualStepRequired {
            instructions: format!(
                "{} already has this key; {} by hand.",
                path.display(),
                patch.existing_key_instructions
            ),
        });
    }

    match patch.apply(&source)? {
        Some(patched) => {
            std::fs::write(path, patched)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(MergeOutcome::Updated)
        }
        None => Ok(MergeOutcome::ManualStepRequired {
            instructions: format!(
                "Add the following to the config object in {}:\n  {}",
                path.display(),
                patch.entry
            ),
        }),
    }
}
