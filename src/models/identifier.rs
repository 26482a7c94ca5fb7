use crate::utils::constants::MUNICIPALITY_ID_WIDTH;
use serde::Deserialize;
use std::fmt;

/// Five-character, zero-padded INE municipality code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct MunicipalityId(String);

impl MunicipalityId {
    /// Trim and left-pad a raw code with zeros (e.g. "1" -> "00001").
    /// Returns `None` for blank input. Codes already at or above the width
    /// are kept as they are.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(format!(
            "{:0>width$}",
            trimmed,
            width = MUNICIPALITY_ID_WIDTH
        )))
    }

    /// Take an already formatted code without touching it.
    pub fn verbatim(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    /// Exactly five ASCII digits
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == MUNICIPALITY_ID_WIDTH && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MunicipalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MunicipalityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_short_codes() {
        assert_eq!(MunicipalityId::normalize("1").unwrap().as_str(), "00001");
        assert_eq!(MunicipalityId::normalize("5000").unwrap().as_str(), "05000");
        assert_eq!(MunicipalityId::normalize(" 8019 ").unwrap().as_str(), "08019");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = MunicipalityId::normalize("01234").unwrap();
        let twice = MunicipalityId::normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.as_str(), "01234");
    }

    #[test]
    fn test_normalize_skips_blank() {
        assert!(MunicipalityId::normalize("").is_none());
        assert!(MunicipalityId::normalize("   ").is_none());
    }

    #[test]
    fn test_verbatim_keeps_value() {
        assert_eq!(MunicipalityId::verbatim("5000").unwrap().as_str(), "5000");
        assert_eq!(MunicipalityId::verbatim(" 08019").unwrap().as_str(), " 08019");
        assert!(MunicipalityId::verbatim("").is_none());
    }

    #[test]
    fn test_well_formed() {
        assert!(MunicipalityId::from("08019").is_well_formed());
        assert!(!MunicipalityId::from("8019").is_well_formed());
        assert!(!MunicipalityId::from("0801A").is_well_formed());
    }
}
