use std::process::ExitCode;

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    FindingsPresent,
}

pub const EXIT_ERROR: u8 = 1;
pub const EXIT_FINDINGS: u8 = 2;

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::FindingsPresent => EXIT_FINDINGS,
        }
    }
}

/// Map a run result to the process exit code, reporting errors on stderr
pub fn exit_code(result: anyhow::Result<Outcome>) -> ExitCode {
    match result {
        Ok(outcome) => ExitCode::from(outcome.code()),
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
