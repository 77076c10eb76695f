use clap::Parser;
use clap::error::ErrorKind;
use pii_core::{InfoType, Likelihood, parse_info_types};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::outcome::EXIT_ERROR;

/// Comma-separated info type list as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoTypeList(pub Vec<InfoType>);

fn parse_info_type_list(s: &str) -> Result<InfoTypeList, String> {
    let info_types = parse_info_types(s).map_err(|e| e.to_string())?;
    if info_types.is_empty() {
        return Err("at least one info type is required".to_string());
    }
    Ok(InfoTypeList(info_types))
}

fn parse_likelihood(s: &str) -> Result<Likelihood, String> {
    s.parse().map_err(|e: pii_core::Error| e.to_string())
}

/// Exit code for a failed parse: 0 for `--help` and `--version`, otherwise the
/// generic error code so usage mistakes never read as "findings present"
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_ERROR,
    }
}

/// Parse the process arguments, printing help, version or the usage error
pub fn parse_args<P: Parser>() -> Result<P, ExitCode> {
    P::try_parse().map_err(|err| {
        let _ = err.print();
        ExitCode::from(usage_exit_code(&err))
    })
}

#[derive(Parser, Debug)]
#[command(name = "detect-pii")]
#[command(about = "Detect or redact PII using the Cloud DLP service", long_about = None)]
#[command(version)]
pub struct DetectCli {
    /// Input file to read ("-" for stdin)
    #[arg(short = 'f', long = "file", default_value = "-")]
    pub file: String,

    /// Redact findings instead of reporting them
    #[arg(long)]
    pub redact: bool,

    /// Image mode (redaction only)
    #[arg(long)]
    pub image: bool,

    /// Likelihood threshold (default from config: LIKELY)
    #[arg(long, visible_alias = "liklihood", value_parser = parse_likelihood)]
    pub likelihood: Option<Likelihood>,

    /// Comma-separated info types to scan for
    #[arg(long = "info-types", value_parser = parse_info_type_list)]
    pub info_types: Option<InfoTypeList>,

    /// Verbosity level: 1 prints the finding count, 2 prints each finding
    #[arg(short = 'v', long = "verbosity", default_value_t = 0)]
    pub verbosity: u8,

    /// Replacement text for redacted spans (default from config: [redacted])
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Print the matched text with each finding (verbosity 2)
    #[arg(long)]
    pub show_quotes: bool,

    /// With --redact --image, mask all text instead of the listed info types
    #[arg(long, requires = "image")]
    pub redact_all_text: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "redact-pii")]
#[command(about = "Strip PII from text or images using the Cloud DLP service", long_about = None)]
#[command(version)]
pub struct RedactPiiCli {
    /// Input file to read ("-" for stdin)
    #[arg(short = 'f', long = "file", default_value = "-")]
    pub file: String,

    /// Treat the input as an image
    #[arg(long)]
    pub image: bool,

    /// Log verbosity
    #[arg(short = 'v', long = "verbosity", default_value_t = 0)]
    pub verbosity: u8,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "redact")]
#[command(about = "Replace PII in text with xxx using the Cloud DLP service", long_about = None)]
#[command(version)]
pub struct RedactCli {
    /// Input file to read ("-" for stdin)
    #[arg(short = 'f', long = "file", default_value = "-")]
    pub file: String,

    /// Log verbosity
    #[arg(short = 'v', long = "verbosity", default_value_t = 0)]
    pub verbosity: u8,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}
