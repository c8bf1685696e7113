//! Ledger behavior switches.
use std::str::FromStr;

use thiserror::Error;

/// Which ratings feed an article's average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatingScope {
    /// Only the ratings of the article itself.
    #[default]
    Article,
    /// Every rating on the platform, as older deployments reported it.
    Global,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown rating scope: {0} (expected `article` or `global`)")]
pub struct UnknownRatingScope(pub String);

impl FromStr for RatingScope {
    type Err = UnknownRatingScope;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "article" => Ok(RatingScope::Article),
            "global" => Ok(RatingScope::Global),
            other => Err(UnknownRatingScope(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LedgerConfig {
    pub rating_scope: RatingScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_scope() {
        assert_eq!("article".parse::<RatingScope>(), Ok(RatingScope::Article));
        assert_eq!(" GLOBAL ".parse::<RatingScope>(), Ok(RatingScope::Global));
        assert_eq!(
            "site".parse::<RatingScope>(),
            Err(UnknownRatingScope("site".to_string()))
        );
    }
}
