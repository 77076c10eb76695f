use pii_cli::cli::{RedactPiiCli, parse_args};
use pii_cli::{commands, exit_code, logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match parse_args::<RedactPiiCli>() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    logging::init(cli.verbosity);

    exit_code(commands::redact::run_redact_pii(cli).await)
}
