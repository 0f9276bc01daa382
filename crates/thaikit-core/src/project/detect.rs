//! Project layout detection for Next.js, Vite and plain React projects

use super::manifest::{parse_declared_version, PackageManifest};
use crate::error::ScaffoldError;
use crate::options::Language;
use crate::runtime::PackageManager;
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Dependency that marks a Next.js project
const NEXT_MARKER: &str = "next";

const NEXT_CONFIG_FILES: &[&str] = &[
    "next.config.js",
    "next.config.mjs",
    "next.config.ts",
    "next.config.cjs",
];

const VITE_CONFIG_FILES: &[&str] = &["vite.config.ts", "vite.config.js", "vite.config.mjs"];

const SOURCE_DIR: &str = "src";

/// Router directories in priority order. `app` is checked before `pages`.
const ROUTER_DIRS: &[(&str, ProjectKind)] = &[
    ("app", ProjectKind::NextAppRouter),
    ("src/app", ProjectKind::NextAppRouter),
    ("pages", ProjectKind::NextPagesRouter),
    ("src/pages", ProjectKind::NextPagesRouter),
];

/// Known project layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    NextAppRouter,
    NextPagesRouter,
    Vite,
    React,
}

impl ProjectKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectKind::NextAppRouter => "Next.js (App Router)",
            ProjectKind::NextPagesRouter => "Next.js (Pages Router)",
            ProjectKind::Vite => "Vite",
            ProjectKind::React => "React",
        }
    }

    pub fn is_next(&self) -> bool {
        matches!(self, ProjectKind::NextAppRouter | ProjectKind::NextPagesRouter)
    }

    /// The framework routes by itself, so no router adapter is offered
    pub fn has_native_routing(&self) -> bool {
        self.is_next()
    }

    /// `compilerOptions.jsx` value expected by the toolchain
    pub fn jsx_mode(&self) -> &'static str {
        if self.is_next() {
            "preserve"
        } else {
            "react-jsx"
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Classification of the target project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectProfile {
    pub kind: ProjectKind,
    /// Project root (where `package.json` lives)
    pub root: PathBuf,
    /// Root for source placement (`src/` or the project root)
    pub base_dir: PathBuf,
    /// Where UI components are written
    pub components_dir: PathBuf,
    /// Declared framework version range, if the manifest names one
    pub framework_version: Option<String>,
    /// Next.js `app`/`pages` directory that decided the kind, when one exists
    pub router_dir: Option<PathBuf>,
    pub package_manager: PackageManager,
}

impl ProjectProfile {
    /// `base_dir` relative to the root, `.` when they coincide
    pub fn base_relative(&self) -> String {
        relative_display(&self.root, &self.base_dir)
    }

    pub fn framework_semver(&self) -> Option<semver::Version> {
        self.framework_version
            .as_deref()
            .and_then(parse_declared_version)
    }

    /// Global stylesheet that receives the Tailwind import.
    ///
    /// The router directory found on disk wins over `base_dir`, which may be an
    /// unrelated `src/` next to a root-level `app/`.
    pub fn css_entry(&self) -> PathBuf {
        match self.kind {
            ProjectKind::NextAppRouter => self
                .router_dir
                .clone()
                .unwrap_or_else(|| self.base_dir.join("app"))
                .join("globals.css"),
            ProjectKind::NextPagesRouter => self
                .router_dir
                .as_deref()
                .and_then(Path::parent)
                .unwrap_or(self.base_dir.as_path())
                .join("styles")
                .join("globals.css"),
            ProjectKind::Vite | ProjectKind::React => self.base_dir.join("index.css"),
        }
    }

    /// Build-tool config to patch, or to create when none exists yet.
    /// Plain React projects have no build config of their own.
    pub fn build_config_path(&self, language: Language) -> Option<PathBuf> {
        let (candidates, fresh) = match self.kind {
            ProjectKind::NextAppRouter | ProjectKind::NextPagesRouter => {
                let supports_ts_config = self
                    .framework_semver()
                    .map(|v| v.major >= 15)
                    .unwrap_or(false);
                let fresh = if language.is_typed() && supports_ts_config {
                    "next.config.ts"
                } else {
                    "next.config.mjs"
                };
                (NEXT_CONFIG_FILES, fresh)
            }
            ProjectKind::Vite => {
                let fresh = if language.is_typed() {
                    "vite.config.ts"
                } else {
                    "vite.config.js"
                };
                (VITE_CONFIG_FILES, fresh)
            }
            ProjectKind::React => return None,
        };

        let existing = first_existing_file(&self.root, candidates);
        Some(existing.unwrap_or_else(|| self.root.join(fresh)))
    }
}

/// Inspect `root` and classify the project. Never writes to disk.
pub fn detect(root: &Path) -> Result<ProjectProfile> {
    if !root.is_dir() {
        return Err(ScaffoldError::MissingTarget(root.to_path_buf()).into());
    }

    let manifest = PackageManifest::read(root);
    let framework_version = manifest
        .as_ref()
        .and_then(|m| m.dependency_version(NEXT_MARKER))
        .map(str::to_string);
    let has_next_config = first_existing_file(root, NEXT_CONFIG_FILES).is_some();
    let is_next = framework_version.is_some() || has_next_config;

    let router = if is_next {
        ROUTER_DIRS
            .iter()
            .map(|(dir, kind)| (root.join(dir), *kind))
            .find(|(dir, _)| dir.is_dir())
    } else {
        None
    };

    let kind = if is_next {
        router
            .as_ref()
            .map(|(_, kind)| *kind)
            .unwrap_or(ProjectKind::NextAppRouter)
    } else if first_existing_file(root, VITE_CONFIG_FILES).is_some() {
        ProjectKind::Vite
    } else {
        ProjectKind::React
    };

    let src = root.join(SOURCE_DIR);
    let base_dir = if kind.is_next() {
        if src.is_dir() {
            src
        } else {
            root.to_path_buf()
        }
    } else {
        // Created by the materializer when missing
        src
    };

    let components_dir = resolve_components_dir(root, &base_dir, kind);

    Ok(ProjectProfile {
        kind,
        root: root.to_path_buf(),
        base_dir,
        components_dir,
        framework_version: framework_version.filter(|_| kind.is_next()),
        router_dir: router.map(|(dir, _)| dir),
        package_manager: PackageManager::detect(root),
    })
}

/// Existing directory first, then the framework's preferred spot, then `<base>/components`
fn resolve_components_dir(root: &Path, base_dir: &Path, kind: ProjectKind) -> PathBuf {
    let existing = [base_dir.join("components"), root.join("components")]
        .into_iter()
        .find(|p| p.is_dir());
    if let Some(dir) = existing {
        return dir;
    }

    match kind {
        ProjectKind::NextAppRouter | ProjectKind::NextPagesRouter => base_dir.join("components"),
        ProjectKind::Vite | ProjectKind::React => root.join(SOURCE_DIR).join("components"),
    }
}

fn first_existing_file(root: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

/// Display `path` relative to `root` with forward slashes
pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_next_manifest(root: &Path) {
        fs::write(
            root.join("package.json"),
            r#"{"dependencies":{"next":"^14.2.3","react":"^18"}}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_next_marker_with_app_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_next_manifest(dir.path());
        fs::create_dir(dir.path().join("app")).unwrap();

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.kind, ProjectKind::NextAppRouter);
        assert_eq!(profile.framework_version.as_deref(), Some("^14.2.3"));
        assert_eq!(profile.base_dir, dir.path());
    }

    #[test]
    fn test_next_marker_with_pages_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_next_manifest(dir.path());
        fs::create_dir_all(dir.path().join("src/pages")).unwrap();

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.kind, ProjectKind::NextPagesRouter);
        assert_eq!(profile.base_dir, dir.path().join("src"));
        assert_eq!(profile.components_dir, dir.path().join("src/components"));
    }

    #[test]
    fn test_next_marker_alone_prefers_app_router() {
        let dir = tempfile::tempdir().unwrap();
        write_next_manifest(dir.path());

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.kind, ProjectKind::NextAppRouter);
    }

    #[test]
    fn test_both_router_dirs_app_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_next_manifest(dir.path());
        fs::create_dir(dir.path().join("pages")).unwrap();
        fs::create_dir(dir.path().join("app")).unwrap();

        assert_eq!(detect(dir.path()).unwrap().kind, ProjectKind::NextAppRouter);
    }

    #[test]
    fn test_root_app_dir_with_unrelated_src() {
        let dir = tempfile::tempdir().unwrap();
        write_next_manifest(dir.path());
        fs::create_dir(dir.path().join("app")).unwrap();
        fs::create_dir_all(dir.path().join("src/lib")).unwrap();

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.kind, ProjectKind::NextAppRouter);
        assert_eq!(profile.base_dir, dir.path().join("src"));
        assert_eq!(profile.router_dir, Some(dir.path().join("app")));
        assert_eq!(profile.css_entry(), dir.path().join("app/globals.css"));
    }

    #[test]
    fn test_css_entry_follows_src_router_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write_next_manifest(dir.path());
        fs::create_dir_all(dir.path().join("src/pages")).unwrap();

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.css_entry(), dir.path().join("src/styles/globals.css"));

        let bare = tempfile::tempdir().unwrap();
        write_next_manifest(bare.path());
        let profile = detect(bare.path()).unwrap();
        assert!(profile.router_dir.is_none());
        assert_eq!(profile.css_entry(), bare.path().join("app/globals.css"));
    }

    #[test]
    fn test_next_config_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("next.config.mjs"), "export default {};\n").unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.kind, ProjectKind::NextPagesRouter);
        assert!(profile.framework_version.is_none());
    }

    #[test]
    fn test_vite_config_detected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vite.config.ts"), "").unwrap();

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.kind, ProjectKind::Vite);
        // src is used even before it exists
        assert_eq!(profile.base_dir, dir.path().join("src"));
        assert_eq!(profile.components_dir, dir.path().join("src/components"));
    }

    #[test]
    fn test_empty_directory_is_react() {
        let dir = tempfile::tempdir().unwrap();
        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.kind, ProjectKind::React);
        assert_eq!(profile.base_relative(), "src");
    }

    #[test]
    fn test_broken_manifest_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{ \"dependencies\": ").unwrap();
        assert_eq!(detect(dir.path()).unwrap().kind, ProjectKind::React);
    }

    #[test]
    fn test_existing_components_dir_preferred() {
        let dir = tempfile::tempdir().unwrap();
        write_next_manifest(dir.path());
        fs::create_dir_all(dir.path().join("src/app")).unwrap();
        fs::create_dir(dir.path().join("components")).unwrap();

        let profile = detect(dir.path()).unwrap();
        assert_eq!(profile.base_dir, dir.path().join("src"));
        assert_eq!(profile.components_dir, dir.path().join("components"));
    }

    #[test]
    fn test_detection_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vite.config.js"), "").unwrap();
        detect(dir.path()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_target_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(detect(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_build_config_path_for_new_next_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies":{"next":"15.0.3"}}"#,
        )
        .unwrap();
        let profile = detect(dir.path()).unwrap();

        assert_eq!(
            profile.build_config_path(Language::TypeScript),
            Some(dir.path().join("next.config.ts"))
        );
        assert_eq!(
            profile.build_config_path(Language::JavaScript),
            Some(dir.path().join("next.config.mjs"))
        );
    }

    #[test]
    fn test_build_config_path_prefers_existing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vite.config.js"), "").unwrap();
        let profile = detect(dir.path()).unwrap();
        assert_eq!(
            profile.build_config_path(Language::TypeScript),
            Some(dir.path().join("vite.config.js"))
        );
    }
}
