//! pdfjson CLI - converts one PDF and prints the result as JSON on stdout
//!
//! Standard output carries exactly one JSON value; logs go to stderr.
//! The exit code is 0 on success and 1 on any failure.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::FalseyValueParser;
use clap::Parser;

use pdfjson::render::{write_json, JsonFormat};
use pdfjson::{BackendOptions, ConversionResult, Converter, Error, ErrorMode};

// The usage message names the installed binary, not argv[0], so the
// payload is the same however the program is invoked.
const BIN_NAME: &str = env!("CARGO_BIN_NAME");

// Help and version flags are disabled so that stdout only ever carries
// the result JSON. The path accepts leading hyphens; only a wrong
// argument count reaches the usage error.
#[derive(Parser, Debug)]
#[command(name = "pdfjson")]
#[command(about = "Convert a PDF to pipeline JSON", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "PDF_PATH", allow_hyphen_values = true)]
    pdf_path: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long, env = "PDFJSON_PRETTY", value_parser = FalseyValueParser::new())]
    pretty: bool,

    /// Fail on pages whose content cannot be decoded
    #[arg(long, env = "PDFJSON_STRICT", value_parser = FalseyValueParser::new())]
    strict: bool,
}

impl Cli {
    fn json_format(&self) -> JsonFormat {
        if self.pretty {
            JsonFormat::Pretty
        } else {
            JsonFormat::Compact
        }
    }

    fn backend_options(&self) -> BackendOptions {
        let mode = if self.strict {
            ErrorMode::Strict
        } else {
            ErrorMode::Lenient
        };
        BackendOptions::new().with_error_mode(mode)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (result, format) = match Cli::try_parse() {
        Ok(cli) => {
            let converter = Converter::with_options(cli.backend_options());
            (converter.run(&cli.pdf_path), cli.json_format())
        }
        Err(e) => {
            log::debug!("Argument error: {}", e);
            let usage = Error::Usage(BIN_NAME.to_string());
            (ConversionResult::from_error(&usage), JsonFormat::Compact)
        }
    };

    if let Err(e) = write_json(&mut io::stdout().lock(), &result, format) {
        log::error!("Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::from(result.exit_code())
}
