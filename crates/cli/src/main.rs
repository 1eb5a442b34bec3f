// tillmerge - combine POS "Transactions Tenders" and "Transactions by
// Item" CSV reports into one reconciled export.

mod config;
mod exit_codes;
mod selection;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};

use tillmerge_core::{
    load_table, merge, projection, DuplicatePolicy, MergeError, Table, TendersIndex,
};

use exit_codes::{merge_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use selection::Selection;

#[derive(Parser)]
#[command(name = "tillmerge")]
#[command(about = "Combine POS tenders and item CSV reports into one reconciled export")]
#[command(version)]
#[command(group(ArgGroup::new("selection").args(["include", "exclude"])))]
#[command(after_help = "\
Exit codes: 3 schema mismatch, 4 malformed row, 5 unknown transaction,
6 tenders/item field mismatch, 7 duplicate transaction (strict mode).

Examples:
  tillmerge tenders.csv items.csv combined.csv
  tillmerge tenders.csv items.csv > combined.csv
  tillmerge -i 'Transaction ID,Tips' tenders.csv items.csv
  tillmerge -x 'UPC,Cost' tenders.csv items.csv
  tillmerge -c monthly tenders.csv items.csv
  cat items.csv | tillmerge tenders.csv - combined.csv")]
struct Cli {
    /// "Transactions Tenders" report (file path, or - for stdin)
    tenders_csv: String,

    /// "Transactions by Item" report (file path, or - for stdin)
    item_csv: String,

    /// Output file (- for stdout)
    #[arg(default_value = "-")]
    output: String,

    /// Only output the given columns, in the order given (comma-separated)
    #[arg(long, short = 'i', value_name = "COLS")]
    include: Option<String>,

    /// Output all columns except the given ones (comma-separated)
    #[arg(long, short = 'x', value_name = "COLS")]
    exclude: Option<String>,

    /// Configuration file [default: ~/.tillmerge.toml]
    #[arg(long, short = 'F', value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// Section of the configuration file to use
    #[arg(long, short = 'c', default_value = config::DEFAULT_SECTION, value_name = "NAME")]
    config_section: String,

    /// Treat duplicate Transaction IDs in the tenders report as an error
    /// instead of keeping the last row
    #[arg(long)]
    strict_duplicates: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let selection = resolve_selection(&cli)?;

    if cli.tenders_csv == "-" && cli.item_csv == "-" {
        return Err(CliError::usage("only one input may come from stdin"));
    }

    let policy = if cli.strict_duplicates {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::LastWins
    };

    // Tenders report is fully indexed before any item row is touched.
    let tenders_data = read_input(&cli.tenders_csv)?;
    let tenders = load_table(Table::Tenders, &tenders_data)
        .map_err(|e| CliError::merge(&cli.tenders_csv, e))?;
    let index = TendersIndex::build(&tenders.rows, policy)
        .map_err(|e| CliError::merge(&cli.tenders_csv, e))?;

    let item_data = read_input(&cli.item_csv)?;
    let items =
        load_table(Table::Item, &item_data).map_err(|e| CliError::merge(&cli.item_csv, e))?;

    let columns = projection::columns(&items.header, selection.include(), selection.exclude());

    let sink: Box<dyn Write> = match cli.output.as_str() {
        "-" => Box::new(io::stdout().lock()),
        path => Box::new(
            std::fs::File::create(path)
                .map_err(|e| CliError::io(format!("cannot create {path}: {e}")))?,
        ),
    };
    let mut writer = csv::Writer::from_writer(sink);

    writer
        .write_record(&columns)
        .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;

    let mut merged_rows = 0usize;
    for merged in merge(&items, &index) {
        let merged = merged.map_err(|e| CliError::merge(&cli.item_csv, e))?;
        let values = projection::render(&merged, &columns)
            .map_err(|e| CliError::merge(&cli.item_csv, e))?;
        writer
            .write_record(values)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        merged_rows += 1;
    }

    writer
        .flush()
        .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;

    eprintln!(
        "merged {merged_rows} item row(s) across {} transaction(s)",
        index.len()
    );

    Ok(())
}

/// Selection precedence: CLI flags, then the config-file section, then
/// everything. A section carrying both include and exclude keeps the
/// include and warns, matching the historical behavior.
fn resolve_selection(cli: &Cli) -> Result<Selection, CliError> {
    if let Some(ref raw) = cli.include {
        return selection::parse_include(raw);
    }
    if let Some(ref raw) = cli.exclude {
        return selection::parse_exclude(raw);
    }

    let section = config::load_section(cli.config_file.as_deref(), &cli.config_section)?;
    // Empty config values count as unset, like a missing key.
    let include = section.include.as_deref().filter(|s| !s.trim().is_empty());
    let exclude = section.exclude.as_deref().filter(|s| !s.trim().is_empty());
    match (include, exclude) {
        (Some(include), Some(_)) => {
            eprintln!(
                "ignoring exclude from section {:?} of the config file",
                cli.config_section
            );
            selection::parse_include(include)
        }
        (Some(include), None) => selection::parse_include(include),
        (None, Some(exclude)) => selection::parse_exclude(exclude),
        (None, None) => Ok(Selection::All),
    }
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut data = String::new();
        io::stdin()
            .read_to_string(&mut data)
            .map_err(|e| CliError::io(format!("cannot read stdin: {e}")))?;
        return Ok(data);
    }
    std::fs::read_to_string(path).map_err(|e| CliError::io(format!("cannot read {path}: {e}")))
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Wrap a core error, naming the file it came from.
    pub fn merge(source: &str, err: MergeError) -> Self {
        let label = if source == "-" { "<stdin>" } else { source };
        Self {
            code: merge_exit_code(&err),
            message: format!("{label}: {err}"),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
