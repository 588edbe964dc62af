//! crumbtrail - Entry Point

use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// crumbtrail - terminal viewer for breadcrumb trails
#[derive(Parser, Debug)]
#[command(name = "crumbtrail")]
#[command(version)]
#[command(about = "Virtualized, column-aligned viewer for error breadcrumb trails")]
pub struct Args {
    /// Path to a JSONL (or JSON array) breadcrumb file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Highlight a search term in every cell
    #[arg(short, long)]
    pub search: Option<String>,

    /// Start with times shown relative to the reference time
    #[arg(short, long)]
    pub relative: bool,

    /// Origin of relative times, RFC 3339 (defaults to the last breadcrumb)
    #[arg(long)]
    pub reference_time: Option<DateTime<Utc>>,

    /// Organization the trail belongs to; shows event references
    #[arg(long)]
    pub org: Option<String>,

    /// Rows rendered beyond each edge of the viewport
    #[arg(long)]
    pub overscan: Option<usize>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = crumbtrail::config::load_config_with_precedence(args.config.clone())?;
        let merged = crumbtrail::config::merge_config(config_file);
        let with_env = crumbtrail::config::apply_env_overrides(merged);
        let relative_override = if args.relative { Some(true) } else { None };
        crumbtrail::config::apply_cli_overrides(with_env, args.overscan, relative_override)
    };

    crumbtrail::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = crumbtrail::source::detect_input_source(args.file.clone())?;

    let cli_args = crumbtrail::view::CliArgs {
        search: args.search,
        org_id: args.org,
        reference_time: args.reference_time,
        relative_time: config.relative_time,
        no_color: args.no_color,
        list_options: config.list_options(),
    };

    crumbtrail::view::run_with_source(input_source, cli_args)?;

    Ok(())
}
