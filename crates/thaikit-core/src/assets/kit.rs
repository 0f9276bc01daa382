//! Kit manifest (`kit.yaml`) and CLI compatibility checking

use crate::error::ScaffoldError;
use anyhow::Result;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const KIT_MANIFEST: &str = "kit.yaml";

/// Directory inside the kit that holds the copyable sources
pub const KIT_SOURCES: &str = "src";

/// Describes the bundled component kit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitManifest {
    /// Display name of the kit
    pub name: String,

    /// Short description shown in the intro
    pub description: String,

    /// Semver version of the kit
    pub version: String,

    /// Oldest CLI that understands this kit layout
    #[serde(default)]
    pub min_cli_version: Option<String>,
}

impl KitManifest {
    /// Load the manifest from a kit root. A missing kit is a broken installation.
    pub fn load(kit_root: &Path) -> Result<Self> {
        let manifest_path = kit_root.join(KIT_MANIFEST);
        if !kit_root.is_dir() || !manifest_path.is_file() {
            return Err(ScaffoldError::MissingAssets(kit_root.to_path_buf()).into());
        }

        let content = std::fs::read_to_string(&manifest_path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ScaffoldError::InvalidKitManifest {
                path: manifest_path.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Root of the copyable sources, erroring when the kit ships none
pub fn sources_root(kit_root: &Path) -> Result<PathBuf> {
    let root = kit_root.join(KIT_SOURCES);
    if !root.is_dir() {
        return Err(ScaffoldError::MissingAssets(root).into());
    }
    Ok(root)
}

/// Compare the CLI version against what the kit requires.
/// Returns a warning message if the CLI is too old.
pub fn check_compatibility(
    cli_version: &str,
    kit: &KitManifest,
    upgrade_command: &str,
) -> Option<String> {
    let required = kit.min_cli_version.as_deref()?;
    let cli_ver = Version::parse(cli_version.strip_prefix('v').unwrap_or(cli_version)).ok()?;
    let required_ver = Version::parse(required.strip_prefix('v').unwrap_or(required)).ok()?;

    if cli_ver < required_ver {
        Some(format!(
            "Warning: {} {} needs CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            kit.name, kit.version, required, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kit(min: Option<&str>) -> KitManifest {
        KitManifest {
            name: "Thaikit".to_string(),
            description: "Thai-locale React components".to_string(),
            version: "0.3.0".to_string(),
            min_cli_version: min.map(str::to_string),
        }
    }

    #[test]
    fn test_cli_older_than_required() {
        let warning = check_compatibility("0.1.0", &kit(Some("0.2.0")), "cargo install thaikit-cli --force");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer() {
        assert!(check_compatibility("0.2.0", &kit(Some("0.2.0")), "upgrade").is_none());
        assert!(check_compatibility("v0.3.1", &kit(Some("0.2.0")), "upgrade").is_none());
    }

    #[test]
    fn test_no_requirement_or_invalid_versions() {
        assert!(check_compatibility("0.1.0", &kit(None), "upgrade").is_none());
        assert!(check_compatibility("invalid", &kit(Some("0.2.0")), "upgrade").is_none());
    }

    #[test]
    fn test_only_min_cli_version_is_compared() {
        let newer_kit = KitManifest {
            version: "0.9.0".to_string(),
            ..kit(Some("0.1.0"))
        };
        assert!(check_compatibility("0.3.0", &newer_kit, "upgrade").is_none());
    }

    #[test]
    fn test_missing_kit_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = KitManifest::load(&dir.path().join("kit")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::MissingAssets(_))
        ));
    }

    #[test]
    fn test_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(KIT_MANIFEST), "name: [unclosed").unwrap();
        let err = KitManifest::load(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::InvalidKitManifest { .. })
        ));
    }

    #[test]
    fn test_load_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(KIT_MANIFEST),
            "name: Thaikit\ndescription: Components\nversion: 0.3.0\n",
        )
        .unwrap();
        let manifest = KitManifest::load(dir.path()).unwrap();
        assert_eq!(manifest.version, "0.3.0");
        assert!(manifest.min_cli_version.is_none());
        assert!(sources_root(dir.path()).is_err());
    }
}
