use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid info type: {0:?}")]
    InvalidInfoType(String),

    #[error("Invalid likelihood: {0:?} (expected one of VERY_UNLIKELY, UNLIKELY, POSSIBLE, LIKELY, VERY_LIKELY)")]
    InvalidLikelihood(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_quote_the_input() {
        assert_eq!(
            Error::InvalidInfoType("bad type".to_string()).to_string(),
            "Invalid info type: \"bad type\""
        );
        assert!(
            Error::InvalidLikelihood("MAYBE".to_string())
                .to_string()
                .starts_with("Invalid likelihood: \"MAYBE\"")
        );
    }
}
