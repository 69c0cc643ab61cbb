use clap::Parser;
use sheet_inspect::cli::{self, DEFAULT_FILE, ENV_FILE, EXIT_FAILURE};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sheet-inspect")]
#[command(about = "Print the sheets, contents, shape and column types of a spreadsheet")]
#[command(long_about = "sheet-inspect - look inside an unfamiliar spreadsheet

Opens the workbook, lists its sheet names and loads the FIRST sheet.
The first row of that sheet is taken as the column labels.

REPORT (stdout):
  Sheet names       every sheet, in workbook order
  --- ALL DATA ---  the full first sheet, no truncation
  --- Columns ---   column labels
  --- Shape ---     row and column counts
  --- Data Types ---  inferred type of each column
                    (int64, float64, bool, datetime64[ns], object)

On failure a single 'Error: <message>' line is printed instead of the
report and the exit status is 1.

FORMATS:
  .xlsx .xlsm .xlsb .xls .ods

EXAMPLES:
  sheet-inspect rates.xlsx
  SHEET_INSPECT_FILE=rates.xlsx sheet-inspect
  RUST_LOG=sheet_inspect=debug sheet-inspect rates.xlsx")]
#[command(version)]
struct Cli {
    /// Path to the spreadsheet file
    #[arg(env = ENV_FILE, default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// Log loader diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "sheet_inspect=debug"
    } else {
        "sheet_inspect=warn"
    };

    // stdout carries the report, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli::run(&cli.file, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "failed to write report");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
