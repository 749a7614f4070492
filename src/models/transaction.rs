use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earned,
    Spent,
}

impl TransactionKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TransactionKind::Earned => "earned",
            TransactionKind::Spent => "spent",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "earned" => Some(TransactionKind::Earned),
            "spent" => Some(TransactionKind::Spent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Earned => "Earned",
            TransactionKind::Spent => "Spent",
        }
    }
}

/// One GreenPoints ledger entry. `amount` is always positive; the sign
/// comes from `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: String,
    pub timestamp: DateTime<FixedOffset>,
}

impl Transaction {
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            TransactionKind::Earned => self.amount,
            TransactionKind::Spent => -self.amount,
        }
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.to_rfc3339()
    }
}

/// Boundary request for crediting points.
#[derive(Debug, Clone)]
pub struct EarnPointsRequest {
    pub amount: i64,
    pub description: String,
}

/// Boundary request for debiting points.
#[derive(Debug, Clone)]
pub struct SpendPointsRequest {
    pub amount: i64,
    pub description: String,
}

fn validate(amount: i64, description: &str) -> AppResult<()> {
    if amount <= 0 {
        return Err(AppError::InvalidAmount(amount));
    }
    if description.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "a description is required for every GreenPoints transaction".into(),
        ));
    }
    Ok(())
}

impl EarnPointsRequest {
    pub fn new(amount: i64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate(self.amount, &self.description)
    }
}

impl SpendPointsRequest {
    pub fn new(amount: i64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate(self.amount, &self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_db_strings_roundtrip() {
        for kind in [TransactionKind::Earned, TransactionKind::Spent] {
            assert_eq!(TransactionKind::from_db_str(kind.to_db_str()), Some(kind));
        }
        assert_eq!(TransactionKind::from_db_str("refund"), None);
    }

    #[test]
    fn requests_reject_non_positive_amounts() {
        assert!(matches!(
            EarnPointsRequest::new(0, "x").validate(),
            Err(AppError::InvalidAmount(0))
        ));
        assert!(matches!(
            SpendPointsRequest::new(-5, "x").validate(),
            Err(AppError::InvalidAmount(-5))
        ));
    }

    #[test]
    fn requests_require_a_description() {
        assert!(matches!(
            EarnPointsRequest::new(10, "   ").validate(),
            Err(AppError::InvalidInput(_))
        ));
        assert!(SpendPointsRequest::new(10, "coffee").validate().is_ok());
    }
}
