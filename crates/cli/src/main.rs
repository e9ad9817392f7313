// RiskGrid CLI - headless grid extraction, insertion, and fraud scoring

mod exit_codes;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use riskgrid_client::{Environment, ScoreClient, ScoreError};
use riskgrid_config::Settings;
use riskgrid_grid::{
    to_grid, to_records, CellValue, Grid, GridSelector, GridTarget, MemoryHost, Record,
    TabularHost,
};

use exit_codes::{
    EXIT_ERROR, EXIT_FORMAT, EXIT_HTTP, EXIT_INPUT, EXIT_NETWORK, EXIT_RESPONSE, EXIT_SUCCESS,
    EXIT_TIMEOUT, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "rgrid")]
#[command(about = "Extract tabular data, score it for fraud risk, write it back")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read delimited text and print it as header-keyed records
    #[command(after_help = "\
Examples:
  rgrid extract payments.csv
  cat payments.csv | rgrid extract
  rgrid extract payments.csv --range A1:C20")]
    Extract {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Restrict to an A1-style range of the input, e.g. B2:D9
        #[arg(long)]
        range: Option<String>,

        /// Print the raw grid (array of rows) instead of records
        #[arg(long)]
        raw: bool,
    },

    /// Turn a JSON payload (records or raw rows) into delimited text
    #[command(after_help = "\
Examples:
  rgrid insert records.json -o sheet.csv
  rgrid extract in.csv | rgrid insert > out.csv")]
    Insert {
        /// JSON input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Send a grid to the fraud scoring service and write back the
    /// scored grid with per-row risk annotations
    Score(ScoreArgs),

    /// Persisted settings: credential, environment, proxy
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct ScoreArgs {
    /// Input file (stdin when omitted)
    file: Option<PathBuf>,

    /// Output file for the scored grid (stdout when omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Scoring API credential (falls back to saved settings)
    #[arg(long, env = "RISKGRID_API_KEY")]
    api_key: Option<String>,

    /// Environment selector: production, dev, or a custom subdomain token
    #[arg(long)]
    environment: Option<String>,

    /// Proxy endpoint; when set, requests are relayed through it
    #[arg(long)]
    proxy_url: Option<String>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Update one or more settings
    Set {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        environment: Option<String>,
        #[arg(long)]
        custom_environment: Option<String>,
        #[arg(long)]
        proxy_url: Option<String>,
    },
    /// Print current settings (credential masked)
    Show,
    /// Clear all settings in one batch
    Clear,
}

/// CLI-level error carrying the process exit code.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT, message: msg.into(), hint: None }
    }

    fn format(msg: impl Into<String>) -> Self {
        Self { code: EXIT_FORMAT, message: msg.into(), hint: None }
    }

    fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ScoreError> for CliError {
    fn from(err: ScoreError) -> Self {
        let code = match &err {
            ScoreError::MissingApiKey | ScoreError::EmptyInput | ScoreError::Host(_) => EXIT_INPUT,
            ScoreError::Network(_) => EXIT_NETWORK,
            ScoreError::Timeout(_) => EXIT_TIMEOUT,
            ScoreError::Http(..) => EXIT_HTTP,
            ScoreError::Parse(_) | ScoreError::InvalidResponse(_) => EXIT_RESPONSE,
        };
        Self { code, message: err.to_string(), hint: None }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(e.code)
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Extract { file, range, raw } => cmd_extract(file, range, raw),
        Commands::Insert { file, output } => cmd_insert(file, output),
        Commands::Score(args) => cmd_score(args),
        Commands::Config { action } => cmd_config(action),
    }
}

// ── extract ─────────────────────────────────────────────────────────

fn cmd_extract(
    file: Option<PathBuf>,
    range: Option<String>,
    raw: bool,
) -> Result<(), CliError> {
    let grid = read_input_grid(file.as_deref())?;
    let mut host = MemoryHost::with_active(grid);

    let selector = match range {
        Some(address) => GridSelector::Address(address),
        None => GridSelector::ActiveUsedRange,
    };
    let grid = host
        .read_grid(&selector)
        .map_err(CliError::input)?;

    let json = if raw {
        serde_json::to_string_pretty(&grid)
    } else {
        serde_json::to_string_pretty(&to_records(&grid))
    }
    .map_err(|e| CliError::io(e.to_string()))?;

    println!("{}", json);
    Ok(())
}

// ── insert ──────────────────────────────────────────────────────────

fn cmd_insert(file: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), CliError> {
    let text = read_input_text(file.as_deref())?;
    if text.trim().is_empty() {
        return Err(CliError::format("no data to insert"));
    }

    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| CliError::format(format!("invalid JSON: {}", e)))?;
    let grid = payload_to_grid(value)?;

    write_output_grid(&grid, output.as_deref())
}

/// The insert payload may be contextual records (array of objects) or a
/// raw grid (array of row arrays). Either way it must be non-empty.
fn payload_to_grid(value: serde_json::Value) -> Result<Grid, CliError> {
    let serde_json::Value::Array(items) = value else {
        return Err(CliError::format("data must be a JSON array"));
    };
    if items.is_empty() {
        return Err(CliError::format("data must be a non-empty array"));
    }

    match &items[0] {
        serde_json::Value::Object(_) => {
            let records: Vec<Record> = items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::Object(map) => Ok(map),
                    _ => Err(CliError::format(
                        "mixed payload: expected every element to be a record object",
                    )),
                })
                .collect::<Result<_, _>>()?;
            Ok(to_grid(&records))
        }
        serde_json::Value::Array(_) => {
            let rows: Vec<Vec<CellValue>> = items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::Array(cells) => {
                        Ok(cells.iter().map(CellValue::from_json).collect())
                    }
                    _ => Err(CliError::format(
                        "mixed payload: expected every element to be a row array",
                    )),
                })
                .collect::<Result<_, _>>()?;
            Ok(Grid::from_rows(rows))
        }
        _ => Err(CliError::format(
            "data must be an array of record objects or row arrays",
        )),
    }
}

// ── score ───────────────────────────────────────────────────────────

fn cmd_score(args: ScoreArgs) -> Result<(), CliError> {
    let settings = Settings::load();

    // Flag > environment variable (via clap) > saved settings
    let api_key = args
        .api_key
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| settings.api_key.clone());

    let selector = match &args.environment {
        Some(env) => env.clone(),
        None => settings
            .effective_environment()
            .map_err(|e| CliError::input(e))?
            .to_string(),
    };
    let environment = Environment::from_selector(&selector);

    let proxy = args.proxy_url.clone().or_else(|| settings.proxy());

    let grid = read_input_grid(args.file.as_deref())?;
    let mut host = MemoryHost::with_active(grid);

    let client = ScoreClient::new(api_key, environment, proxy)?;
    let outcome = client.score_and_write(
        &mut host,
        &GridSelector::ActiveUsedRange,
        &GridTarget::Selection,
    )?;

    write_output_grid(host.active_grid(), args.output.as_deref())?;

    if outcome.fills.is_empty() {
        eprintln!("scored {} rows (no risk annotations)", outcome.records.len());
    } else {
        eprintln!("scored {} rows:", outcome.records.len());
        for (row, level) in &outcome.fills {
            eprintln!("  row {}: {}", row, level);
        }
    }
    Ok(())
}

// ── config ──────────────────────────────────────────────────────────

fn cmd_config(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Set { api_key, environment, custom_environment, proxy_url } => {
            if api_key.is_none()
                && environment.is_none()
                && custom_environment.is_none()
                && proxy_url.is_none()
            {
                return Err(CliError {
                    code: EXIT_USAGE,
                    message: "nothing to set".into(),
                    hint: Some(
                        "pass at least one of --api-key, --environment, \
                         --custom-environment, --proxy-url"
                            .into(),
                    ),
                });
            }

            let mut settings = Settings::load();
            if let Some(v) = api_key {
                settings.api_key = v;
            }
            if let Some(v) = environment {
                settings.environment = v;
            }
            if let Some(v) = custom_environment {
                settings.custom_environment = v;
            }
            if let Some(v) = proxy_url {
                settings.proxy_url = v;
            }
            settings.save().map_err(CliError::io)
        }
        ConfigAction::Show => {
            let settings = Settings::load();
            println!("score.apiKey            {}", mask(&settings.api_key));
            println!("score.environment       {}", or_unset(&settings.environment));
            println!("score.customEnvironment {}", or_unset(&settings.custom_environment));
            println!("score.proxyUrl          {}", or_unset(&settings.proxy_url));
            Ok(())
        }
        ConfigAction::Clear => Settings::clear().map_err(CliError::io),
    }
}

fn mask(key: &str) -> String {
    if key.is_empty() {
        return "(unset)".into();
    }
    // Count in chars, not bytes: keys may carry multi-byte characters.
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        "****".into()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}

// ── I/O helpers ─────────────────────────────────────────────────────

fn read_input_text(file: Option<&std::path::Path>) -> Result<String, CliError> {
    match file {
        Some(path) => riskgrid_io::delimited::read_file_as_utf8(path)
            .map_err(|e| CliError::io(format!("{}: {}", path.display(), e))),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::io(e.to_string()))?;
            Ok(buf)
        }
    }
}

fn read_input_grid(file: Option<&std::path::Path>) -> Result<Grid, CliError> {
    let grid = match file {
        Some(path) => riskgrid_io::delimited::import(path)
            .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::io(e.to_string()))?;
            riskgrid_io::delimited::parse_text(&buf)
        }
    };
    if grid.is_empty() {
        return Err(
            CliError::input("input contains no rows")
                .with_hint("the first row must be a header row"),
        );
    }
    Ok(grid)
}

fn write_output_grid(grid: &Grid, output: Option<&std::path::Path>) -> Result<(), CliError> {
    match output {
        Some(path) => riskgrid_io::csv::export(grid, path)
            .map_err(|e| CliError::io(format!("{}: {}", path.display(), e))),
        None => {
            let text = riskgrid_io::csv::export_string(grid).map_err(CliError::io)?;
            print!("{}", text);
            Ok(())
        }
    }
}
