use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use passbook_core::{ExtractionPass, ParseResult};
use passbook_ingest::{
    detect_variant, parse_text_with_skipped, ExtractError, ExtractedText, ParseContext, Skipped,
    StatementParser,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod output;
mod state;

use config::{config_path, init_config, load_config, OutputFormat};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PASSBOOK_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "passbook",
    version,
    long_version = LONG_VERSION,
    about = "Turn bank statement PDFs into structured transactions"
)]
struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ~/.passbook/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and print the result
    Parse {
        /// Statement PDF, or extracted text with --text / a .txt extension
        file: PathBuf,

        /// Treat the file as already-extracted text
        #[arg(long)]
        text: bool,

        /// Page count reported for text input
        #[arg(long, default_value_t = 1)]
        page_count: u32,

        /// Year for MM/DD rows (default: config parse.year, then the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Output format (default: config output.format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Report lines that looked like transactions but were dropped
        #[arg(long)]
        skipped: bool,
    },

    /// Print the detected bank layout
    Detect {
        file: PathBuf,

        #[arg(long)]
        text: bool,
    },

    /// Manage ~/.passbook/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg_path = config_path(cli.config.as_deref())?;
    let cfg = load_config(&cfg_path)?;

    let level = match cli.verbose {
        0 => cfg.log_level()?,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(config = %cfg_path.display(), "loaded config");

    match cli.command {
        Command::Parse {
            file,
            text,
            page_count,
            year,
            format,
            skipped,
        } => {
            let mut ctx = ParseContext::now();
            if let Some(y) = year.or(cfg.parse.year) {
                ctx = ctx.with_default_year(y);
            }
            let format = format.unwrap_or(cfg.output.format);
            let as_text = is_text_input(&file, text);
            parse_cmd(&file, as_text, page_count, &ctx, format, cfg.output.pretty, skipped)?;
        }

        Command::Detect { file, text } => {
            let extracted = load_statement(&file, is_text_input(&file, text), 1)??;
            println!("{}", detect_variant(&extracted.text));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&cfg_path)?,
            ConfigCommand::Show => print!("{}", toml::to_string_pretty(&cfg)?),
            ConfigCommand::Path => println!("{}", cfg_path.display()),
        },
    }

    Ok(())
}

fn is_text_input(file: &Path, flag: bool) -> bool {
    flag || file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Outer error: the file could not be read. Inner error: no text came out of it.
fn load_statement(
    file: &Path,
    as_text: bool,
    page_count: u32,
) -> Result<Result<ExtractedText, ExtractError>> {
    if as_text {
        return Ok(Ok(ExtractedText {
            text: state::read_text_input(file)?,
            page_count,
        }));
    }
    let pdf = state::read_input(file)?;
    Ok(StatementParser::default().extract_text(&pdf))
}

fn parse_cmd(
    file: &Path,
    as_text: bool,
    page_count: u32,
    ctx: &ParseContext,
    format: OutputFormat,
    pretty: bool,
    skipped: bool,
) -> Result<()> {
    let result = match load_statement(file, as_text, page_count)? {
        Ok(extracted) => {
            let (result, dropped) = parse_text_with_skipped(&extracted.text, extracted.page_count, ctx);
            if skipped {
                for line in skipped_report(&result, &dropped) {
                    eprintln!("{line}");
                }
            }
            result
        }
        Err(err) => {
            warn!(error = %err, file = %file.display(), "statement text extraction failed");
            ParseResult::failed(err.to_string())
        }
    };

    let stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => output::write_json(stdout, &result, pretty)?,
        OutputFormat::Csv => output::write_csv(stdout, result.transactions())?,
    }

    if let Some(err) = &result.error {
        bail!("{}: {}", file.display(), err);
    }
    Ok(())
}

/// Lines for `--skipped`: the pass used, then each candidate dropped for a bad field
fn skipped_report(result: &ParseResult, skipped: &[Skipped]) -> Vec<String> {
    let pass = result
        .statement
        .as_ref()
        .map(|s| pass_label(s.metadata.extraction_pass))
        .unwrap_or("no");

    let dropped: Vec<&Skipped> = skipped.iter().filter(|s| s.reason.is_field_failure()).collect();
    let mut out = vec![format!("{} pass: {} dropped candidate(s)", pass, dropped.len())];
    out.extend(dropped.iter().map(|s| format!("  line {}: {}", s.line, s.reason)));
    out
}

fn pass_label(pass: ExtractionPass) -> &'static str {
    match pass {
        ExtractionPass::Primary => "grammar",
        ExtractionPass::Fallback => "fallback",
    }
}
