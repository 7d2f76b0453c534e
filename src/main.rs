use clap::{ArgAction, Parser};
use rule_sync::report::{self, OutputFormat};
use rule_sync::{
    load_config, load_config_from_file, Error, HttpRuleSource, RuleFilter, RuleSyncer,
    RunSummary, SyncRequest,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rule-sync", version)]
#[command(about = "Download editor rule files into a project's .cursor/rules directory")]
struct Cli {
    /// Re-download and replace rules that already exist locally
    #[arg(long)]
    overwrite: bool,

    /// Only sync matching rules: '|'-separated globs or substrings, e.g. "react*|tailwind"
    #[arg(long, value_name = "PATTERN")]
    filter: Option<String>,

    /// Use an alternate configuration file
    #[arg(long, value_name = "FILE", env = "RULE_SYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Remote location serving the rule files
    #[arg(long, value_name = "URL", env = "RULE_SYNC_BASE_URL")]
    base_url: Option<String>,

    /// Per-file download timeout in seconds
    #[arg(long, value_name = "SECONDS", env = "RULE_SYNC_TIMEOUT",
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only print totals and failures
    #[arg(short, long)]
    quiet: bool,

    /// Project directory that receives .cursor/rules/
    target_directory: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let quiet = cli.quiet;

    let summary = match run(cli).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(if e.is_usage() { 2 } else { 1 });
        }
    };

    if let Err(e) = report::print_summary(&summary, format, quiet) {
        eprintln!("Error writing summary: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> rule_sync::Result<RunSummary> {
    // Validate user input before touching the filesystem or network
    let filter = cli.filter.as_deref().map(RuleFilter::parse).transpose()?;

    let config = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(Error::Config {
                path: path.clone(),
                message: "file not found".to_string(),
            })
        }
        Some(path) => load_config_from_file(path)?,
        None => load_config()?,
    };
    let settings = config.resolve(cli.base_url.clone(), cli.timeout)?;

    let source = HttpRuleSource::new(settings.base_url, settings.timeout)?;
    let syncer = RuleSyncer::new(settings.manifest, source);

    let request = SyncRequest::new(cli.target_directory)
        .with_overwrite(cli.overwrite)
        .with_filter(filter);

    syncer.run(&request).await
}
