//! Validated chance percentage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chance used when nothing else is configured.
pub const DEFAULT_CHANCE: u8 = 5;

/// Errors from validating a chance percentage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChanceError {
    #[error("please enter a number between 1 and 100 (got {0:?})")]
    NotANumber(String),
    #[error("please enter a number between 1 and 100 (got {0})")]
    OutOfRange(i64),
}

/// Probability, in whole percent, that an eligible line receives a message.
///
/// Always within [1, 100]. Values outside that range cannot be constructed,
/// which keeps the gate comparison in the selector well defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ChancePercent(u8);

impl ChancePercent {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ChanceError> {
        Self::try_from(i64::from(value))
    }

    /// Parse user input, as typed into a prompt.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a plain
    /// integer is rejected rather than partially parsed.
    pub fn parse_input(input: &str) -> Result<Self, ChanceError> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ChanceError::NotANumber(trimmed.to_string()))?;
        Self::try_from(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ChancePercent {
    fn default() -> Self {
        Self(DEFAULT_CHANCE)
    }
}

impl TryFrom<i64> for ChancePercent {
    type Error = ChanceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ChanceError::OutOfRange(value));
        }
        Ok(Self(value as u8))
    }
}

impl From<ChancePercent> for u8 {
    fn from(chance: ChancePercent) -> Self {
        chance.0
    }
}

impl std::str::FromStr for ChancePercent {
    type Err = ChanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_input(s)
    }
}

impl std::fmt::Display for ChancePercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_accepts_range() {
        assert_eq!(ChancePercent::parse_input("1").unwrap().get(), 1);
        assert_eq!(ChancePercent::parse_input(" 42 ").unwrap().get(), 42);
        assert_eq!(ChancePercent::parse_input("100").unwrap().get(), 100);
    }

    #[test]
    fn test_parse_input_rejects_bad_values() {
        assert_eq!(
            ChancePercent::parse_input("0"),
            Err(ChanceError::OutOfRange(0))
        );
        assert_eq!(
            ChancePercent::parse_input("101"),
            Err(ChanceError::OutOfRange(101))
        );
        assert_eq!(
            ChancePercent::parse_input("-5"),
            Err(ChanceError::OutOfRange(-5))
        );
        assert!(matches!(
            ChancePercent::parse_input("abc"),
            Err(ChanceError::NotANumber(_))
        ));
        assert!(matches!(
            ChancePercent::parse_input("12abc"),
            Err(ChanceError::NotANumber(_))
        ));
        assert!(matches!(
            ChancePercent::parse_input(""),
            Err(ChanceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(ChancePercent::default().get(), DEFAULT_CHANCE);
        assert_eq!(ChancePercent::new(25).unwrap().to_string(), "25%");
        assert!(ChancePercent::new(0).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let chance: ChancePercent = serde_yaml::from_str("30").unwrap();
        assert_eq!(chance.get(), 30);
        assert!(serde_yaml::from_str::<ChancePercent>("0").is_err());
        assert!(serde_yaml::from_str::<ChancePercent>("250").is_err());
        assert_eq!(serde_json::to_string(&chance).unwrap(), "30");
    }
}
