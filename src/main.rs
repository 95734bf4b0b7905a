use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use refaudit::config::expand_path;
use refaudit::report::{ReportFormat, Reporter};
use refaudit::{Auditor, CancelToken, Config};

/// Exit status when there is nothing to do or the command line is invalid
const USAGE_EXIT: u8 = 1;
/// Exit status when the audit itself fails
const FAILURE_EXIT: u8 = 2;

const EXAMPLES: &str = "\
Examples:
\trefaudit --from /path/to/library/ --to /path/to/app1 /path/to/app2 | tee ~/unused1.json
\trefaudit --from /path/to/library/ --to /path/to/app1 --exclude-to /path/to/app1/exclude | tee ~/unused2.json";

/// Find potentially unused exports in go code. Works across repos. There
/// will be false positives.
#[derive(Parser, Debug)]
#[command(name = "refaudit")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
struct Cli {
    /// Directories that contain exports
    #[arg(long, value_name = "DIR", num_args = 1..)]
    from: Vec<String>,

    /// Directories that contain exports that you want to exclude
    #[arg(long, value_name = "DIR", num_args = 1..)]
    exclude_from: Vec<String>,

    /// Directories that contain imports
    #[arg(long, value_name = "DIR", num_args = 1..)]
    to: Vec<String>,

    /// Directories that contain imports that you want to exclude
    #[arg(long, value_name = "DIR", num_args = 1..)]
    exclude_to: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip paths matched by .gitignore/.ignore files and hidden entries
    #[arg(long)]
    respect_gitignore: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Terminal,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Terminal => "terminal",
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                eprintln!("{}", e);
            }
            return if e.use_stderr() {
                ExitCode::from(USAGE_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(report) => {
            eprintln!("{:?}", report);
            return ExitCode::from(FAILURE_EXIT);
        }
    };

    if config.has_no_roots() {
        print_usage();
        return ExitCode::from(USAGE_EXIT);
    }

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || on_interrupt.cancel()) {
        warn!("Could not install interrupt handler: {}", e);
    }

    match run(&config, cancel) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{:?}", report);
            ExitCode::from(FAILURE_EXIT)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the report
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        let cwd = std::env::current_dir().into_diagnostic()?;
        Config::from_default_locations(&cwd)?
    };

    // CLI paths extend the configured ones
    let expand = |paths: &[String]| paths.iter().map(|p| expand_path(p)).collect::<Vec<_>>();
    config.from.extend(expand(&cli.from));
    config.exclude_from.extend(expand(&cli.exclude_from));
    config.to.extend(expand(&cli.to));
    config.exclude_to.extend(expand(&cli.exclude_to));

    if let Some(format) = cli.format {
        config.format = format.as_str().to_string();
    }
    if cli.output.is_some() {
        config.output = cli.output.clone();
    }
    if cli.respect_gitignore {
        config.respect_ignore_files = true;
    }

    Ok(config)
}

fn run(config: &Config, cancel: CancelToken) -> Result<()> {
    info!("refaudit v{}", env!("CARGO_PKG_VERSION"));
    info!("--from: {}", join_paths(&config.from));
    info!("--to: {}", join_paths(&config.to));
    info!("--exclude-to: {}", join_paths(&config.exclude_to));
    info!("--exclude-from: {}", join_paths(&config.exclude_from));

    let format: ReportFormat = config
        .format
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;
    let report = Auditor::new(config.clone())
        .with_cancel_token(cancel)
        .run()?;

    Reporter::new(format, config.output.clone()).report(&report)
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_usage() {
    println!("Find potentially unused exports in go code. Works across repos. There will be false positives.");
    println!("Usage:\n\trefaudit --from [files] --to [files]");
    println!("--from: Directories that contain exports.");
    println!("--to: Directories that contain imports.");
    println!("--exclude-to: Directories that contain imports that you want to exclude. Optional.");
    println!("--exclude-from: Directories that contain exports that you want to exclude. Optional.");
    println!("{}", EXAMPLES);
}
