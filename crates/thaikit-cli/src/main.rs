//! Thaikit CLI - adds the Thaikit component kit to React and Next.js projects

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use thaikit_core::options::{Routing, ScaffoldOptions};
use thaikit_core::tui::InitArgs;
use thaikit_core::{ProductConfig, ProjectProfile};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Kit location inside a release archive, next to the binary
const INSTALLED_KIT_DIR: &str = "templates/ui-kit";

/// Thaikit product configuration
#[derive(Clone)]
pub struct ThaikitConfig;

impl ProductConfig for ThaikitConfig {
    fn name(&self) -> &'static str {
        "thaikit"
    }

    fn display_name(&self) -> &'static str {
        "Thaikit"
    }

    fn default_template_dir(&self) -> PathBuf {
        let installed = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(INSTALLED_KIT_DIR)));
        match installed {
            Some(dir) if dir.is_dir() => dir,
            _ => Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates/ui-kit"),
        }
    }

    fn template_dir_env(&self) -> &'static str {
        "THAIKIT_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/thaikit/thaikit#readme"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for adding the Thaikit component library to React and Next.js projects"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install thaikit-cli --force"
    }

    fn next_steps(
        &self,
        dir: &Path,
        _profile: &ProjectProfile,
        options: &ScaffoldOptions,
    ) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Provider setup
        steps.push(
            "Wrap your app in <ThaiProvider> from \"@/components\" for Thai locale and theme"
                .to_string(),
        );
        if options.data_fetching {
            steps.push(
                "Add <QueryProvider> from \"@/lib/query/query-client\" next to <ThaiProvider>"
                    .to_string(),
            );
        }
        if options.routing != Routing::None {
            steps.push("Define your routes in \"@/lib/router\"".to_string());
        }

        // Step 3: Use components
        steps.push("import { Button, DataTable } from \"@/components\"".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "thaikit")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect the project, ask a few questions, then copy components and wire up config
    Init(CliInitArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "cwd")]
    pub directory: Option<PathBuf>,

    /// Local kit directory to use instead of the bundled one (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Accept all defaults without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Do not run the package manager
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            directory: args.directory,
            template_dir: args.template_dir,
            yes: args.yes,
            skip_install: args.skip_install,
        }
    }
}

fn print_usage<C: ProductConfig>(config: &C) -> Result<()> {
    Args::command()
        .name(config.name())
        .about(config.cli_description())
        .print_long_help()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = ThaikitConfig;

    // Help, no arguments, and anything unrecognized all print usage and exit 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            print!("{}", e);
            return Ok(());
        }
        Err(_) => return print_usage(&config),
    };

    match args.command {
        Some(Command::Init(init_args)) => {
            let result = thaikit_core::run(&config, init_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => print_usage(&config),
    }
}
