//! Package manager detection and dependency installation
//!
//! This module provides:
//! - Lock-file based package manager detection
//! - The dependency lists implied by the chosen options
//! - Installation through the project's package manager

pub mod install;
pub mod package_manager;

pub use install::{dependencies, install, DependencySet};
pub use package_manager::{check_package_manager, PackageManager, RuntimeInfo};
