//! Target project inspection
//!
//! Detection only reads the filesystem. The resulting `ProjectProfile` is
//! computed once per run and shared read-only by every later step.

pub mod detect;
pub mod manifest;

pub use detect::{detect, ProjectKind, ProjectProfile};
pub use manifest::PackageManifest;
