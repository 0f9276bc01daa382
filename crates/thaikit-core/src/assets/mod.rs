//! Kit sources and their materialization
//!
//! This module provides:
//! - The kit manifest and CLI compatibility check
//! - Static asset categories with option-driven inclusion predicates
//! - The additive copier that writes categories into a project
//! - The TypeScript-stripping transform used for JavaScript projects

pub mod category;
pub mod kit;
pub mod materializer;
pub mod transform;

pub use category::{AssetCategory, Barrel, Destination, CATEGORIES};
pub use kit::{check_compatibility, sources_root, KitManifest};
pub use materializer::{materialize, MaterializePlan, MaterializeReport};
pub use transform::{SourceTransform, TypeStripper};
