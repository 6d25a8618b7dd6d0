//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use backstageify_core::pipeline::{GenerateConfig, GenerateResult, ProgressReporter};
use backstageify_shared::{AppConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// backstageify — publish the azd template gallery into a Backstage catalog.
#[derive(Parser)]
#[command(
    name = "backstageify",
    version,
    about = "Convert the awesome-azd template gallery into Backstage catalog entities.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch the gallery and (re)write the catalog file.
    Generate {
        /// Template index URL (defaults to the awesome-azd gallery).
        #[arg(long)]
        index_url: Option<String>,

        /// Output path for the catalog file.
        #[arg(short, long)]
        out: Option<String>,

        /// Namespace/owner for generated entities.
        #[arg(long)]
        namespace: Option<String>,

        /// Skip templates whose manifest cannot be fetched or assembled.
        #[arg(long)]
        keep_going: bool,

        /// Do not stage a newly created catalog file with git.
        #[arg(long)]
        no_stage: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "backstageify=info",
        1 => "backstageify=debug",
        _ => "backstageify=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            index_url,
            out,
            namespace,
            keep_going,
            no_stage,
        } => {
            cmd_generate(
                index_url.as_deref(),
                out.as_deref(),
                namespace.as_deref(),
                keep_going,
                no_stage,
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

async fn cmd_generate(
    index_url: Option<&str>,
    out: Option<&str>,
    namespace: Option<&str>,
    keep_going: bool,
    no_stage: bool,
) -> Result<()> {
    let config = load_config()?;

    // Flags override config file values.
    let index_url = index_url.unwrap_or(&config.defaults.index_url);
    let index_url =
        Url::parse(index_url).map_err(|e| eyre!("invalid index URL '{index_url}': {e}"))?;

    let output_path = PathBuf::from(out.unwrap_or(&config.defaults.output_path));
    let namespace = namespace.unwrap_or(&config.defaults.namespace).to_string();

    let generate_config = GenerateConfig {
        index_url,
        output_path,
        namespace,
        timeout_secs: config.fetch.timeout_secs,
        keep_going,
        stage_new_files: !no_stage,
    };

    info!(
        index_url = %generate_config.index_url,
        out = %generate_config.output_path.display(),
        namespace = %generate_config.namespace,
        keep_going,
        "generating catalog"
    );

    let reporter = CliProgress::new();
    let result = backstageify_core::generate(&generate_config, &reporter).await?;

    // Print summary
    println!();
    println!("  Catalog written successfully!");
    println!("  Entities:  {}", result.entity_count);
    println!("  Templates: {}", result.templates_processed);
    if result.templates_skipped > 0 {
        println!("  Skipped:   {}", result.templates_skipped);
    }
    println!("  Created:   {}", if result.created { "yes" } else { "no" });
    println!("  Path:      {}", result.output_path.display());
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn template_fetched(&self, title: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching azure.yaml [{current}/{total}] {title}"));
    }

    fn done(&self, _result: &GenerateResult) {
        self.spinner.finish_and_clear();
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
