//! Charm-style CLI flow using cliclack

use super::prompter::CliclackPrompter;
use crate::assets::{self, KitManifest};
use crate::config::MergeOutcome;
use crate::options::{self, Prompter, ScaffoldOptions, ScriptedPrompter};
use crate::pipeline::{self, ScaffoldContext, ScaffoldReport};
use crate::product::ProductConfig;
use crate::project::{self, detect::relative_display, ProjectProfile};
use crate::runtime;
use anyhow::Result;
use std::path::PathBuf;

/// CLI arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Project directory to scaffold into (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Kit directory to use instead of the bundled one
    pub template_dir: Option<PathBuf>,

    /// Accept every default without prompting
    pub yes: bool,

    /// Skip running the package manager
    pub skip_install: bool,
}

/// Run the init flow with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: InitArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Validate the kit (a missing kit is a broken installation)
    let kit_root = config.template_dir(args.template_dir.as_deref());
    let kit = KitManifest::load(&kit_root)?;
    cliclack::log::info(format!("{} {} - {}", kit.name, kit.version, kit.description))?;

    if let Some(warning) = assets::check_compatibility(cli_version, &kit, config.upgrade_command())
    {
        cliclack::log::warning(warning.lines().next().unwrap_or(&warning).to_string())?;
    }

    // Step 2: Detect the project
    let ctx = ScaffoldContext::new(resolve_directory(&args)?, kit_root);
    let profile = project::detect(&ctx.target_dir)?;
    describe_profile(&profile)?;

    // Step 3: Collect options
    let mut prompter: Box<dyn Prompter> = if args.yes {
        cliclack::log::info("Using defaults (--yes)")?;
        Box::new(ScriptedPrompter::defaults())
    } else {
        Box::new(CliclackPrompter)
    };
    let options = options::collect(&profile, prompter.as_mut())?;
    if profile.kind.has_native_routing() {
        cliclack::log::info(format!("{} handles routing; router adapter skipped", profile.kind))?;
    }

    // Step 4: Confirm before touching anything
    print_summary(&profile, &options)?;
    if !options::confirm(prompter.as_mut())? {
        cliclack::outro_cancel("Cancelled. Nothing was changed.")?;
        return Ok(());
    }

    // Step 5: Write files
    let spinner = cliclack::spinner();
    spinner.start("Adding components...");
    let report = match pipeline::apply(&ctx, &profile, &options).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Scaffolding failed");
            return Err(e);
        }
    };
    spinner.stop(format!(
        "Added {} files to {}",
        report.assets.written.len(),
        profile.root.display()
    ));
    report_assets(&profile, &report)?;
    report_configs(&profile, &report)?;

    // Step 6: Install dependencies (soft failure)
    let installed = install_dependencies(&ctx, &profile, &options, &args).await?;

    // Step 7: Show next steps
    print_next_steps(config, &profile, &options, installed)?;

    Ok(())
}

fn resolve_directory(args: &InitArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }
    Ok(path)
}

fn describe_profile(profile: &ProjectProfile) -> Result<()> {
    let version = profile
        .framework_version
        .as_deref()
        .map(|v| format!(" {}", v))
        .unwrap_or_default();
    cliclack::log::success(format!("Detected {}{}", profile.kind, version))?;

    let pm = runtime::check_package_manager(profile.package_manager);
    if !pm.available {
        cliclack::log::warning(format!(
            "{} not found on PATH; dependencies will need a manual install",
            pm.name
        ))?;
    }
    Ok(())
}

fn print_summary(profile: &ProjectProfile, options: &ScaffoldOptions) -> Result<()> {
    let mut lines = vec![
        format!("Project      {}", profile.kind),
        format!("Source root  {}", profile.base_relative()),
        format!(
            "Components   {}",
            relative_display(&profile.root, &profile.components_dir)
        ),
    ];
    for (label, value) in options.summary() {
        lines.push(format!("{:<13}{}", label, value));
    }
    lines.push(format!("Installer    {}", profile.package_manager));

    cliclack::note("Summary", lines.join("\n"))?;
    Ok(())
}

fn report_assets(profile: &ProjectProfile, report: &ScaffoldReport) -> Result<()> {
    let assets = &report.assets;
    if !assets.skipped_existing.is_empty() {
        cliclack::log::info(format!(
            "Kept {} existing files unchanged",
            assets.skipped_existing.len()
        ))?;
    }
    if !assets.missing_sources.is_empty() {
        cliclack::log::warning(format!(
            "Kit has no sources for: {} (skipped)",
            assets.missing_sources.join(", ")
        ))?;
    }
    if !assets.transformed.is_empty() {
        cliclack::log::info(format!(
            "Converted {} files to JavaScript under {}. Conversion is best-effort; review them for leftover type syntax.",
            assets.transformed.len(),
            profile.base_relative()
        ))?;
    }
    Ok(())
}

fn report_configs(profile: &ProjectProfile, report: &ScaffoldReport) -> Result<()> {
    for change in &report.configs {
        let name = relative_display(&profile.root, &change.path);
        match &change.outcome {
            MergeOutcome::Created | MergeOutcome::Updated => {
                cliclack::log::success(format!("{}: {}", name, change.outcome))?
            }
            MergeOutcome::AlreadyConfigured => {
                cliclack::log::info(format!("{}: {}", name, change.outcome))?
            }
            MergeOutcome::Skipped { .. } => cliclack::log::warning(format!(
                "{}: {}. Left untouched; please update it manually.",
                name, change.outcome
            ))?,
            MergeOutcome::ManualStepRequired { instructions } => {
                cliclack::log::warning(format!("{}: {}", name, instructions))?
            }
        }
    }
    Ok(())
}

async fn install_dependencies(
    ctx: &ScaffoldContext,
    profile: &ProjectProfile,
    options: &ScaffoldOptions,
    args: &InitArgs,
) -> Result<bool> {
    let deps = runtime::dependencies(options);
    if args.skip_install {
        cliclack::log::info(format!(
            "Skipping install. Run:\n{}",
            deps.manual_commands(profile.package_manager).join("\n")
        ))?;
        return Ok(false);
    }

    cliclack::log::step(format!("Installing dependencies with {}", profile.package_manager))?;
    let installed = runtime::install(&ctx.target_dir, options, profile.package_manager).await;
    if installed {
        cliclack::log::success("Dependencies installed")?;
    } else {
        cliclack::log::warning("Dependencies were not installed; continuing")?;
    }
    Ok(installed)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    profile: &ProjectProfile,
    options: &ScaffoldOptions,
    installed: bool,
) -> Result<()> {
    let mut steps = Vec::new();
    if !installed {
        steps.push("Install the dependencies listed above".to_string());
    }
    steps.extend(config.next_steps(&profile.root, profile, options));

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Docs: {}", config.docs_url()))?;

    Ok(())
}
