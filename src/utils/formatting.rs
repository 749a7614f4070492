//! Formatting utilities used for CLI and export outputs.

use crate::models::transaction::{Transaction, TransactionKind};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `+50` for earned, `-20` for spent.
pub fn signed_points(tx: &Transaction) -> String {
    match tx.kind {
        TransactionKind::Earned => format!("+{}", tx.amount),
        TransactionKind::Spent => format!("-{}", tx.amount),
    }
}

/// Monetary value rendered with two decimals.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
