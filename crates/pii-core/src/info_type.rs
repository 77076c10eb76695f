use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

lazy_static! {
    static ref INFO_TYPE_NAME: Regex = Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap();
}

/// Categories `detect-pii` scans for when none are given
pub const DEFAULT_DETECT_INFO_TYPES: &[&str] = &[
    "CREDIT_CARD_NUMBER",
    "CREDIT_CARD_TRACK_NUMBER",
    "EMAIL_ADDRESS",
    "ETHNIC_GROUP",
    "FIRST_NAME",
    "GCP_CREDENTIALS",
    "ICD9_CODE",
    "ICD10_CODE",
    "IP_ADDRESS",
    "LAST_NAME",
    "LOCATION",
    "PASSPORT",
    "PERSON_NAME",
    "PHONE_NUMBER",
    "STREET_ADDRESS",
];

/// Categories masked by `redact-pii --image`
pub const DEFAULT_IMAGE_INFO_TYPES: &[&str] = &[
    "AGE",
    "CREDIT_CARD_NUMBER",
    "CREDIT_CARD_TRACK_NUMBER",
    "DATE",
    "DATE_OF_BIRTH",
    "DOMAIN_NAME",
    "EMAIL_ADDRESS",
    "ETHNIC_GROUP",
    "FEMALE_NAME",
    "FIRST_NAME",
    "GCP_CREDENTIALS",
    "GENDER",
    "IBAN_CODE",
    "ICD9_CODE",
    "ICD10_CODE",
    "IMEI_HARDWARE_ID",
    "IP_ADDRESS",
    "LAST_NAME",
    "LOCATION",
    "MAC_ADDRESS",
    "MAC_ADDRESS_LOCAL",
    "MALE_NAME",
    "MEDICAL_TERM",
    "PASSPORT",
    "PERSON_NAME",
    "PHONE_NUMBER",
    "STREET_ADDRESS",
    "SWIFT_CODE",
    "TIME",
    "URL",
];

/// A PII category understood by the DLP service (e.g. `EMAIL_ADDRESS`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfoType {
    pub name: String,
}

impl InfoType {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if !INFO_TYPE_NAME.is_match(trimmed) {
            return Err(Error::InvalidInfoType(name));
        }
        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    /// Build a list from static names known to be valid
    pub fn from_names(names: &[&str]) -> Vec<Self> {
        names
            .iter()
            .map(|name| Self {
                name: (*name).to_string(),
            })
            .collect()
    }
}

impl FromStr for InfoType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parse a comma-separated info type list.
///
/// Empty items are skipped and duplicates keep their first position.
pub fn parse_info_types(list: &str) -> Result<Vec<InfoType>> {
    let mut info_types: Vec<InfoType> = Vec::new();
    for item in list.split(',') {
        if item.trim().is_empty() {
            continue;
        }
        let info_type = InfoType::new(item)?;
        if !info_types.contains(&info_type) {
            info_types.push(info_type);
        }
    }
    Ok(info_types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let types = parse_info_types("EMAIL_ADDRESS, PHONE_NUMBER,,EMAIL_ADDRESS").unwrap();
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["EMAIL_ADDRESS", "PHONE_NUMBER"]);
    }

    #[test]
    fn test_rejects_malformed_name() {
        assert!(matches!(
            parse_info_types("EMAIL_ADDRESS,phone number"),
            Err(Error::InvalidInfoType(_))
        ));
        assert!(InfoType::new("ICD10_CODE").is_ok());
        assert!(InfoType::new("").is_err());
    }

    #[test]
    fn test_default_lists() {
        assert_eq!(DEFAULT_DETECT_INFO_TYPES.len(), 15);
        assert_eq!(DEFAULT_IMAGE_INFO_TYPES.len(), 30);
        for name in DEFAULT_DETECT_INFO_TYPES.iter().chain(DEFAULT_IMAGE_INFO_TYPES) {
            assert!(InfoType::new(*name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_serializes_as_object() {
        let json = serde_json::to_value(InfoType::new("URL").unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "URL" }));
    }
}
