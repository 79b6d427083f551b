//! CLI entry point for the table wrangling pipeline.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::io::Read;
use std::path::Path;
use table_wrangler::{
    generate_chart, Enhancement, FormulaKind, Pipeline, PipelineConfig, Table, TransformInput,
};
use tracing::info;

#[cfg(feature = "ai")]
use std::env;
#[cfg(feature = "ai")]
use tracing::warn;
#[cfg(feature = "ai")]
use std::sync::Arc;
#[cfg(feature = "ai")]
use table_wrangler::ai::{AIProvider, GeminiProvider, OpenRouterProvider, ProviderChain};

/// File extensions treated as images and sent to the provider as inline data.
const IMAGE_EXTENSIONS: [(&str, &str); 5] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
];

/// CLI-compatible named enhancement enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliEnhancement {
    /// Trim whitespace, drop empty rows, normalize dates and money columns
    Clean,
    /// Add a DataType column classifying each row's values
    DetectCategories,
    /// Merge rows with identical key columns, summing quantity-like values
    Merge,
    /// Fill blank cells with the column mean or mode
    FillMissing,
}

impl From<CliEnhancement> for Enhancement {
    fn from(cli: CliEnhancement) -> Self {
        match cli {
            CliEnhancement::Clean => Enhancement::Clean,
            CliEnhancement::DetectCategories => Enhancement::DetectCategories,
            CliEnhancement::Merge => Enhancement::MergeSimilarRows,
            CliEnhancement::FillMissing => Enhancement::FillMissing,
        }
    }
}

/// CLI-compatible formula enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormula {
    /// Total of a column, appended as a new row
    Sum,
    /// Mean of a column, appended as a new row
    Average,
    /// Largest value in a column, appended as a new row
    Max,
    /// Smallest value in a column, appended as a new row
    Min,
    /// Count of non-empty values, appended as a new row
    Count,
    /// Each value as a percentage of the column total, as a new column
    Percentage,
    /// Row-over-row growth rate, as a new column
    Growth,
}

impl From<CliFormula> for FormulaKind {
    fn from(cli: CliFormula) -> Self {
        match cli {
            CliFormula::Sum => FormulaKind::Sum,
            CliFormula::Average => FormulaKind::Average,
            CliFormula::Max => FormulaKind::Max,
            CliFormula::Min => FormulaKind::Min,
            CliFormula::Count => FormulaKind::Count,
            CliFormula::Percentage => FormulaKind::Percentage,
            CliFormula::Growth => FormulaKind::Growth,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Turn messy text, files, and images into structured tables",
    long_about = "An AI-optional table wrangling tool.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  GEMINI_API_KEY        API key for Google Gemini (preferred provider)\n  \
                  OPENROUTER_API_KEY    API key for OpenRouter (text-only fallback)\n\n\
                  EXAMPLES:\n  \
                  # Structure pasted text from stdin\n  \
                  echo 'Alice sold 40 units, Bob sold 52' | table-wrangler\n\n  \
                  # Parse a CSV file and clean it\n  \
                  table-wrangler -i data.csv --enhance clean\n\n  \
                  # Extract a table from a screenshot\n  \
                  table-wrangler -i receipt.png\n\n  \
                  # Ask a question (sorts/filters apply deterministically)\n  \
                  table-wrangler -i data.csv --query 'sort by revenue highest'\n\n  \
                  # Deterministic mode (no AI)\n  \
                  table-wrangler -i data.csv --no-ai --chart"
)]
struct Args {
    /// Path to the input file (text, CSV, or image)
    ///
    /// If not specified, text is read from stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Apply a named enhancement to the structured table
    #[arg(long, value_enum)]
    enhance: Option<CliEnhancement>,

    /// Apply free-form AI instructions to the structured table
    #[arg(long)]
    instructions: Option<String>,

    /// Apply a formula to a column (requires --column)
    #[arg(long, value_enum)]
    formula: Option<CliFormula>,

    /// Column the formula applies to
    #[arg(long)]
    column: Option<String>,

    /// Ask a natural-language question about the table
    ///
    /// Sort, deduplicate, and filter requests also mutate the table
    #[arg(short, long)]
    query: Option<String>,

    /// Emit a chart spec for the table as JSON
    #[arg(long)]
    chart: bool,

    /// Generate a short narrative summary of the table
    #[arg(long)]
    story: bool,

    /// Delimiter used for sniffing, parsing, and output
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Disable AI structuring (deterministic paths only)
    #[arg(long, default_value = "false")]
    no_ai: bool,

    /// Suppress progress output (only show warnings and the final result)
    #[arg(long)]
    quiet: bool,

    /// Output the table as JSON instead of delimited text
    ///
    /// Disables all progress logs; only the JSON is written to stdout.
    /// Useful for piping to other tools: `... --json | jq .columns`
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    let input = read_input(&args)?;

    let config = PipelineConfig::builder()
        .delimiter(args.delimiter)
        .use_ai(!args.no_ai)
        .build();

    let mut builder = Pipeline::builder().config(config);

    #[cfg(feature = "ai")]
    if !args.no_ai {
        match build_provider()? {
            Some(provider) => builder = builder.provider(provider),
            None => warn!(
                "no API key found (GEMINI_API_KEY or OPENROUTER_API_KEY); \
                 falling back to deterministic structuring"
            ),
        }
    }

    let pipeline = builder.build()?;

    let mut table = pipeline.transform(&input)?;
    info!(
        rows = table.rows.len(),
        columns = table.columns.len(),
        "table structured"
    );

    if let Some(enhancement) = args.enhance {
        table = pipeline.enhance(&table, enhancement.into());
        info!(enhancement = ?enhancement, "enhancement applied");
    }

    if let Some(ref instructions) = args.instructions {
        let outcome = pipeline.enhance_freeform(&table, instructions, !args.quiet)?;
        if let Some(explanation) = outcome.explanation {
            info!("{}", explanation);
        }
        table = outcome.table;
    }

    if let Some(formula) = args.formula {
        let column = args
            .column
            .as_deref()
            .ok_or_else(|| anyhow!("--formula requires --column"))?;
        let outcome = pipeline.apply_formula(&table, formula.into(), column)?;
        if let Some(explanation) = outcome.explanation {
            info!("{}", explanation);
        }
        table = outcome.table;
    }

    if let Some(ref question) = args.query {
        let outcome = pipeline.query(&table, question)?;
        println!("{}", outcome.answer);
        if let Some(updated) = outcome.updated_table {
            table = updated;
        }
    }

    if args.story {
        println!("{}", pipeline.story(&table)?);
    }

    if args.chart {
        let spec = generate_chart(&table);
        println!("{}", serde_json::to_string_pretty(&spec)?);
        return Ok(());
    }

    print_table(&table, &args)?;
    Ok(())
}

/// Read the input as text from stdin, or as text/image bytes from a file.
fn read_input(args: &Args) -> Result<TransformInput> {
    let Some(ref path) = args.input else {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(TransformInput::Text(text));
    };

    if !Path::new(path).exists() {
        return Err(anyhow!("Input file not found: {}", path));
    }

    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if let Some((_, mime)) = IMAGE_EXTENSIONS.iter().find(|(ext, _)| *ext == extension) {
        let data = std::fs::read(path)?;
        info!(path, mime, "reading image input");
        return Ok(TransformInput::Image {
            data,
            mime_type: mime.to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let file_name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);
    Ok(TransformInput::File { content, file_name })
}

/// Print the final table to stdout.
///
/// Note: this uses `println!` intentionally for user-facing CLI output.
/// Unlike logging, the table should always be visible regardless of log
/// level settings since it is the primary output of the tool.
fn print_table(table: &Table, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(table)?);
    } else {
        println!("{}", table_wrangler::serialize_delimited(table, args.delimiter));
    }
    Ok(())
}

/// Build the provider stack from environment variables.
///
/// Gemini is preferred because it accepts image input; when both keys are
/// present the providers are chained so OpenRouter catches Gemini outages.
#[cfg(feature = "ai")]
fn build_provider() -> Result<Option<Arc<dyn AIProvider>>> {
    let gemini = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
    let openrouter = env::var("OPENROUTER_API_KEY").ok().filter(|k| !k.is_empty());

    let provider: Option<Arc<dyn AIProvider>> = match (gemini, openrouter) {
        (Some(g), Some(o)) => Some(Arc::new(ProviderChain::new(vec![
            Arc::new(GeminiProvider::new(g)?),
            Arc::new(OpenRouterProvider::new(o)?),
        ]))),
        (Some(g), None) => Some(Arc::new(GeminiProvider::new(g)?)),
        (None, Some(o)) => Some(Arc::new(OpenRouterProvider::new(o)?)),
        (None, None) => None,
    };
    Ok(provider)
}
