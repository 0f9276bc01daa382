//! `package.json` reading
//!
//! Only the dependency tables matter for detection. Anything that fails to
//! read or parse is treated as "no manifest".

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Read `package.json` from `dir`, swallowing read and parse failures
    pub fn read(dir: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(dir.join(MANIFEST_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Declared version range of a dependency, runtime table first
    pub fn dependency_version(&self, name: &str) -> Option<&str> {
        self.dependencies
            .get(name)
            .or_else(|| self.dev_dependencies.get(name))
            .map(|v| v.as_str().unwrap_or("*"))
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependency_version(name).is_some()
    }
}

/// Best-effort conversion of a declared range (`^14.2.0`, `~15`, `>=13.4`) to
/// the version it is anchored on
pub fn parse_declared_version(declared: &str) -> Option<semver::Version> {
    let trimmed = declared
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit());
    let core: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let core = core.trim_end_matches('.');
    if core.is_empty() {
        return None;
    }

    let parts = core.split('.').count();
    let padded = match parts {
        1 => format!("{}.0.0", core),
        2 => format!("{}.0", core),
        _ => core.to_string(),
    };
    semver::Version::parse(&padded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_lookup_checks_both_tables() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{"dependencies":{"react":"^18.3.1"},"devDependencies":{"next":"14.2.3"}}"#,
        )
        .unwrap();
        assert_eq!(manifest.dependency_version("react"), Some("^18.3.1"));
        assert_eq!(manifest.dependency_version("next"), Some("14.2.3"));
        assert!(!manifest.has_dependency("vite"));
    }

    #[test]
    fn test_unparseable_manifest_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        assert!(PackageManifest::read(dir.path()).is_none());
    }

    #[test]
    fn test_parse_declared_version() {
        assert_eq!(
            parse_declared_version("^14.2.3"),
            Some(semver::Version::new(14, 2, 3))
        );
        assert_eq!(parse_declared_version("~15"), Some(semver::Version::new(15, 0, 0)));
        assert_eq!(
            parse_declared_version(">=13.4"),
            Some(semver::Version::new(13, 4, 0))
        );
        assert_eq!(parse_declared_version("latest"), None);
    }
}
