use crate::models::transaction::Transaction;
use serde::Serialize;

/// Flat row for CSV / JSON export of the points history.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TransactionExport {
    pub id: i64,
    pub timestamp: String,
    pub kind: String,
    pub amount: i64,
    pub signed_amount: i64,
    pub description: String,
}

impl From<&Transaction> for TransactionExport {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            timestamp: t.timestamp_str(),
            kind: t.kind.to_db_str().to_string(),
            amount: t.amount,
            signed_amount: t.signed_amount(),
            description: t.description.clone(),
        }
    }
}
