//! Package manager detection for the target project

use std::fmt;
use std::path::Path;
use std::process::Command;

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lock files in order of precedence
const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Pick the package manager from the lock file present in `dir`, defaulting to npm
    pub fn detect(dir: &Path) -> Self {
        LOCK_FILES
            .iter()
            .find(|(file, _)| dir.join(file).is_file())
            .map(|(_, pm)| *pm)
            .unwrap_or(PackageManager::Npm)
    }

    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Subcommand that adds packages to the manifest
    pub fn add_subcommand(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            _ => "add",
        }
    }

    /// Full argument list for adding `packages`, as dev dependencies when `dev` is set
    pub fn add_args(&self, packages: &[String], dev: bool) -> Vec<String> {
        let mut args = vec![self.add_subcommand().to_string()];
        if dev {
            args.push("-D".to_string());
        }
        args.extend(packages.iter().cloned());
        args
    }

    /// The command line a user can paste to install `packages` by hand
    pub fn command_line(&self, packages: &[String], dev: bool) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.add_args(packages, dev));
        parts.join(" ")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// Availability of a package manager binary on this machine
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether the package manager binary is on PATH
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    let output = Command::new(pm.program()).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: pm.program(),
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: pm.program(),
            version: None,
            available: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_defaults_to_npm() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Npm);
    }

    #[test]
    fn test_detect_from_lock_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Yarn);

        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_command_line() {
        let pkgs = vec!["zustand".to_string(), "dayjs".to_string()];
        assert_eq!(
            PackageManager::Npm.command_line(&pkgs, false),
            "npm install zustand dayjs"
        );
        assert_eq!(
            PackageManager::Pnpm.command_line(&pkgs, true),
            "pnpm add -D zustand dayjs"
        );
    }
}
