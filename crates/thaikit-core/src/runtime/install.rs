//! Dependency installation through the project's package manager
//!
//! Installation failures are soft: the exact command to run by hand is
//! printed and the caller carries on.

use super::package_manager::PackageManager;
use crate::options::{FormLibrary, Routing, ScaffoldOptions, StateManagement};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Packages every project gets
const BASE_RUNTIME: &[&str] = &[
    "antd",
    "@ant-design/icons",
    "dayjs",
    "axios",
    "clsx",
    "tailwind-merge",
];

const BASE_DEV: &[&str] = &["tailwindcss", "@tailwindcss/postcss", "postcss"];

const TYPESCRIPT_DEV: &[&str] = &["typescript", "@types/react", "@types/react-dom"];

/// Runtime and development packages to add
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    pub runtime: Vec<String>,
    pub dev: Vec<String>,
}

impl DependencySet {
    /// Non-empty package lists in install order, flagged `true` for dev dependencies
    pub fn steps(&self) -> Vec<(&[String], bool)> {
        [(self.runtime.as_slice(), false), (self.dev.as_slice(), true)]
            .into_iter()
            .filter(|(packages, _)| !packages.is_empty())
            .collect()
    }

    /// Manual install commands for both lists
    pub fn manual_commands(&self, pm: PackageManager) -> Vec<String> {
        self.pending_commands(pm, 0)
    }

    /// Commands for the steps left after the first `completed` ones succeeded
    pub fn pending_commands(&self, pm: PackageManager, completed: usize) -> Vec<String> {
        self.steps()
            .into_iter()
            .skip(completed)
            .map(|(packages, dev)| pm.command_line(packages, dev))
            .collect()
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Baseline packages plus whatever each option pulls in
pub fn dependencies(options: &ScaffoldOptions) -> DependencySet {
    let mut runtime = owned(BASE_RUNTIME);
    let mut dev = owned(BASE_DEV);

    if options.language.is_typed() {
        dev.extend(owned(TYPESCRIPT_DEV));
    }

    match options.routing {
        Routing::None => {}
        Routing::ReactRouter => runtime.extend(owned(&["react-router-dom"])),
        Routing::TanStackRouter => runtime.extend(owned(&["@tanstack/react-router"])),
    }

    match options.state_management {
        StateManagement::None => {}
        StateManagement::Zustand => runtime.extend(owned(&["zustand"])),
        StateManagement::ReduxToolkit => {
            runtime.extend(owned(&["@reduxjs/toolkit", "react-redux"]))
        }
    }

    match options.form_library {
        FormLibrary::None => {}
        FormLibrary::ReactHookForm => {
            runtime.extend(owned(&["react-hook-form", "@hookform/resolvers", "zod"]))
        }
        FormLibrary::Formik => runtime.extend(owned(&["formik", "yup"])),
    }

    if options.data_fetching {
        runtime.extend(owned(&["@tanstack/react-query"]));
    }

    DependencySet { runtime, dev }
}

/// Install the option-derived dependencies. Returns `false` on failure after
/// printing the commands to run manually.
pub async fn install(target_dir: &Path, options: &ScaffoldOptions, pm: PackageManager) -> bool {
    let deps = dependencies(options);

    for (completed, (packages, dev)) in deps.steps().into_iter().enumerate() {
        let args = pm.add_args(packages, dev);
        if !run(pm.program(), &args, target_dir).await {
            println!();
            println!("{}", "Dependency installation failed. Run manually:".yellow());
            for command in deps.pending_commands(pm, completed) {
                println!("  {}", command.cyan());
            }
            return false;
        }
    }

    true
}

/// Run a command with inherited stdio, reporting success
async fn run(program: &str, args: &[String], dir: &Path) -> bool {
    println!();
    println!("{} {} {}", "Running:".dimmed(), program.yellow(), args.join(" ").yellow());
    println!();

    let status = TokioCommand::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => true,
        Ok(status) => {
            eprintln!(
                "{} {}",
                "Installer exited with code".red(),
                status.code().unwrap_or(-1)
            );
            false
        }
        Err(e) => {
            eprintln!("{} {}: {}", "Failed to start".red(), program, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Language;

    #[test]
    fn test_default_dependencies() {
        let deps = dependencies(&ScaffoldOptions::default());
        assert_eq!(deps.runtime, owned(BASE_RUNTIME));
        assert!(deps.dev.contains(&"typescript".to_string()));
        assert!(deps.dev.contains(&"@tailwindcss/postcss".to_string()));
    }

    #[test]
    fn test_option_gated_dependencies() {
        let options = ScaffoldOptions {
            language: Language::JavaScript,
            routing: Routing::TanStackRouter,
            state_management: StateManagement::ReduxToolkit,
            form_library: FormLibrary::ReactHookForm,
            data_fetching: true,
        };
        let deps = dependencies(&options);

        for pkg in [
            "@tanstack/react-router",
            "@reduxjs/toolkit",
            "react-redux",
            "react-hook-form",
            "@tanstack/react-query",
        ] {
            assert!(deps.runtime.contains(&pkg.to_string()), "missing {}", pkg);
        }
        assert!(!deps.runtime.contains(&"zustand".to_string()));
        assert!(!deps.dev.contains(&"typescript".to_string()));
    }

    #[test]
    fn test_manual_commands() {
        let deps = DependencySet {
            runtime: vec!["zustand".to_string()],
            dev: vec![],
        };
        assert_eq!(
            deps.manual_commands(PackageManager::Yarn),
            vec!["yarn add zustand".to_string()]
        );
    }

    #[test]
    fn test_pending_commands_skip_completed_steps() {
        let deps = DependencySet {
            runtime: vec!["antd".to_string()],
            dev: vec!["tailwindcss".to_string(), "postcss".to_string()],
        };
        let pm = PackageManager::Pnpm;

        assert_eq!(
            deps.pending_commands(pm, 0),
            vec!["pnpm add antd", "pnpm add -D tailwindcss postcss"]
        );
        // Runtime install went through, dev install failed
        assert_eq!(
            deps.pending_commands(pm, 1),
            vec!["pnpm add -D tailwindcss postcss"]
        );
        assert!(deps.pending_commands(pm, 2).is_empty());
    }

    #[test]
    fn test_empty_lists_are_not_steps() {
        let deps = DependencySet {
            runtime: vec![],
            dev: vec!["postcss".to_string()],
        };
        assert_eq!(deps.steps().len(), 1);
        assert_eq!(deps.pending_commands(PackageManager::Npm, 0), vec!["npm install -D postcss"]);
    }

    #[tokio::test]
    async fn test_missing_program_is_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        let ok = run("thaikit-no-such-package-manager", &["add".to_string()], dir.path()).await;
        assert!(!ok);
    }
}
