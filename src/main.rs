//! CLI entry point for canopy

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use canopy::tree::parse_exclusion_list;
use canopy::{
    OutputFormat, Settings, SymbolStyle, TextRenderer, WalkControl, WalkOutcome, WalkerConfig,
    render, spawn_walk_with,
};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "Print a folder tree, or export it as JSON, HTML or Markdown")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Show hidden (dot) entries
    #[arg(short, long)]
    all: bool,

    /// Do not skip node_modules, .git and the other built-in exclusions
    #[arg(long = "no-default-excludes")]
    no_default_excludes: bool,

    /// Exclude names or glob patterns, comma separated (can be used multiple times)
    #[arg(short = 'I', long = "exclude")]
    exclude: Vec<String>,

    /// Show file size and modification time
    #[arg(short = 's', long = "metadata")]
    metadata: bool,

    /// Connector glyphs for text output
    #[arg(long, value_enum)]
    style: Option<SymbolStyle>,

    /// Output format (defaults to the output file's extension, else text)
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the tree to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,

    /// Load settings from a JSON file before applying flags
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Save the effective settings to a JSON file
    #[arg(long = "save-settings", value_name = "FILE")]
    save_settings: Option<PathBuf>,

    /// Stop after N entries and print the partial tree
    #[arg(long = "node-limit", value_name = "N")]
    node_limit: Option<u64>,

    /// Hide the progress spinner
    #[arg(short, long)]
    quiet: bool,

    /// Log walk details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("canopy: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> canopy::Result<()> {
    let settings = effective_settings(args)?;
    if let Some(path) = &args.save_settings {
        settings.save(path)?;
        info!("settings written to {}", path.display());
    }

    let outcome = walk_with_feedback(&args.path, settings.walker_config(), args)?;
    if outcome.is_cancelled() {
        eprintln!(
            "canopy: warning: stopped after {} entries, output is partial",
            outcome.tree().node_count()
        );
    }
    let tree = outcome.into_tree();

    let format = args
        .format
        .or_else(|| args.output.as_deref().map(OutputFormat::from_path))
        .unwrap_or_default();
    let mut options = settings.render_options();

    match &args.output {
        Some(path) => {
            fs::write(path, render(&tree, format, &options))?;
            debug!("wrote {format:?} output to {}", path.display());
        }
        None if format == OutputFormat::Text => {
            options.use_color = should_use_color(args.color);
            TextRenderer::new(options).print(&tree)?;
        }
        None => print!("{}", render(&tree, format, &options)),
    }
    Ok(())
}

/// Start from the settings file (or defaults) and layer the flags on top.
fn effective_settings(args: &Args) -> canopy::Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(level) = args.level {
        settings.max_depth = Some(level);
    }
    if args.all {
        settings.hide_hidden = false;
    }
    if args.no_default_excludes {
        settings.default_exclusions.clear();
    }
    for raw in &args.exclude {
        settings.extra_exclusions.extend(parse_exclusion_list(raw));
    }
    if args.metadata {
        settings.show_metadata = true;
    }
    if let Some(style) = args.style {
        settings.symbol_style = style;
    }

    settings.validate()?;
    Ok(settings)
}

fn walk_with_feedback(
    root: &Path,
    config: WalkerConfig,
    args: &Args,
) -> canopy::Result<WalkOutcome> {
    let control = WalkControl {
        node_limit: args.node_limit,
        ..WalkControl::default()
    };
    let handle = spawn_walk_with(root, config, control)?;

    let spinner = (!args.quiet && std::io::stderr().is_terminal()).then(new_spinner);
    let outcome = handle.wait_with(|progress| {
        if let Some(spinner) = &spinner {
            spinner.set_position(progress.visited);
            spinner.set_message(progress.path.display().to_string());
        }
    });
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    outcome
}

fn new_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {pos} entries {wide_msg:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
