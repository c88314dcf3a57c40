use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use flexion_extract::{
    DEFAULT_SECTION_ID, DEFAULT_SOURCE_URL, ExtractError, ExtractOptions, Extraction, Extractor,
    OutputFormat, PageFetcher, PronounStrip, TableScan, render,
};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(
    name = "flexion2csv",
    version,
    about = "Extract German verb conjugations from Wiktionary into JSON or CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract the conjugation records of one verb.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Verb infinitive, e.g. gehen.
    verb: String,

    /// Read a saved page instead of fetching it.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output path; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: json or csv.
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Emit a lang,value,tags header row in CSV output.
    #[arg(long)]
    header: bool,

    /// Minimum cells required per table row.
    #[arg(long, default_value_t = 2)]
    min_cells: usize,

    /// Keep a row-spanning leading cell instead of dropping it.
    #[arg(long)]
    no_collapse: bool,

    /// Pronoun removal strategy: split or pattern.
    #[arg(long, default_value = "split")]
    pronoun: String,

    /// Table discovery: siblings or following.
    #[arg(long, default_value = "siblings")]
    scan: String,

    /// Element id marking the conjugation section.
    #[arg(long, default_value = DEFAULT_SECTION_ID)]
    section_id: String,

    /// Page URL template the encoded verb is appended to.
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    source_url: String,

    /// Request timeout in seconds when fetching.
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

struct FileFetcher {
    path: PathBuf,
}

impl PageFetcher for FileFetcher {
    fn fetch(&self, _locator: &Url) -> Result<String, ExtractError> {
        std::fs::read_to_string(&self.path).map_err(|error| {
            ExtractError::Retrieval(format!("failed to read '{}': {error}", self.path.display()))
        })
    }
}

struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("flexion2csv/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, locator: &Url) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(locator.as_str())
            .send()
            .map_err(|error| ExtractError::Retrieval(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Retrieval(format!(
                "failed to fetch {locator}: status {status}"
            )));
        }
        response
            .text()
            .map_err(|error| ExtractError::Retrieval(error.to_string()))
    }
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    let pronoun_strip = PronounStrip::from_str(&args.pronoun)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --pronoun")?;
    let table_scan = TableScan::from_str(&args.scan)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --scan")?;

    Ok(ExtractOptions {
        source_url: args.source_url.clone(),
        section_id: args.section_id.clone(),
        min_cells: args.min_cells,
        collapse_leading_column: !args.no_collapse,
        pronoun_strip,
        table_scan,
    })
}

fn log_extraction(extraction: &Extraction, verbose: bool) {
    if let Some(diagnostic) = &extraction.diagnostic {
        eprintln!("warning: {diagnostic}");
    }
    if extraction.report.warnings.is_empty() {
        return;
    }

    eprintln!(
        "warning: {} issue(s) detected",
        extraction.report.warnings.len()
    );
    if verbose {
        for warning in &extraction.report.warnings {
            eprintln!(
                "  - {:?} table={:?} row={:?}: {}",
                warning.code, warning.table, warning.row, warning.message
            );
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<Extraction> {
    let format = OutputFormat::from_str(&args.format)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --format")?;
    let extractor = Extractor::new(parse_options(args)?)?;

    let extraction = match &args.input {
        Some(path) => extractor.extract(&args.verb, &FileFetcher { path: path.clone() }),
        None => extractor.extract(
            &args.verb,
            &HttpFetcher::new(Duration::from_secs(args.timeout))?,
        ),
    };

    let rendered = render(&extraction.records, format, args.header)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(extraction)
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flexion_extract=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(extraction) => {
                log_extraction(&extraction, args.verbose);
                if extraction.records.is_empty() {
                    ExitCode::from(2)
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
