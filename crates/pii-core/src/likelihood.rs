use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How likely a finding is to be a real instance of its info type.
///
/// Ordered so that `finding.likelihood >= threshold` works as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    #[default]
    #[serde(rename = "LIKELIHOOD_UNSPECIFIED")]
    Unspecified,
    VeryUnlikely,
    Unlikely,
    Possible,
    Likely,
    VeryLikely,
}

impl Likelihood {
    pub const ALL: [Likelihood; 6] = [
        Likelihood::Unspecified,
        Likelihood::VeryUnlikely,
        Likelihood::Unlikely,
        Likelihood::Possible,
        Likelihood::Likely,
        Likelihood::VeryLikely,
    ];

    /// Name used by the DLP API
    pub fn as_str(&self) -> &'static str {
        match self {
            Likelihood::Unspecified => "LIKELIHOOD_UNSPECIFIED",
            Likelihood::VeryUnlikely => "VERY_UNLIKELY",
            Likelihood::Unlikely => "UNLIKELY",
            Likelihood::Possible => "POSSIBLE",
            Likelihood::Likely => "LIKELY",
            Likelihood::VeryLikely => "VERY_LIKELY",
        }
    }
}

impl FromStr for Likelihood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == normalized)
            .ok_or_else(|| Error::InvalidLikelihood(s.to_string()))
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("LIKELY".parse::<Likelihood>().unwrap(), Likelihood::Likely);
        assert_eq!("very-likely".parse::<Likelihood>().unwrap(), Likelihood::VeryLikely);
        assert_eq!(
            " possible ".parse::<Likelihood>().unwrap(),
            Likelihood::Possible
        );
        assert!(matches!(
            "SORTA".parse::<Likelihood>(),
            Err(Error::InvalidLikelihood(_))
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(Likelihood::VeryLikely > Likelihood::Likely);
        assert!(Likelihood::Unspecified < Likelihood::VeryUnlikely);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Likelihood::VeryUnlikely).unwrap(),
            "\"VERY_UNLIKELY\""
        );
        assert_eq!(
            serde_json::to_string(&Likelihood::Unspecified).unwrap(),
            "\"LIKELIHOOD_UNSPECIFIED\""
        );
        let parsed: Likelihood = serde_json::from_str("\"POSSIBLE\"").unwrap();
        assert_eq!(parsed, Likelihood::Possible);
    }
}
