//! Thaikit Core - scaffolding library for the Thaikit component kit
//!
//! Copies the Thaikit React components (Thai-locale formatting, Tailwind
//! utilities, wrappers around the antd widgets) into an existing web project
//! and wires up the configuration they need.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - project detection, config merging, asset
//!   materialization, dependency installation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, option
//!   collection over a `Prompter`, and `pipeline::apply`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use thaikit_core::{options, pipeline, project};
//!
//! let profile = project::detect(&target)?;
//! let mut prompter = options::ScriptedPrompter::defaults();
//! let options = options::collect(&profile, &mut prompter)?;
//! let ctx = pipeline::ScaffoldContext::new(&target, &kit_root);
//! let report = pipeline::apply(&ctx, &profile, &options).await?;
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod product;
pub mod project;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use options::{Language, ScaffoldOptions};
pub use pipeline::{apply, ScaffoldContext, ScaffoldReport};
pub use product::ProductConfig;
pub use project::{detect, ProjectKind, ProjectProfile};
pub use runtime::PackageManager;

#[cfg(feature = "tui")]
pub use tui::run;
