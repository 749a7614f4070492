//! GreenPoints ledger.
//!
//! An append-only list of transactions. The balance is never stored: it is
//! always folded from the list, so it cannot drift from the history.

use crate::core::clock::Clock;
use crate::core::notify::Notifier;
use crate::errors::{AppError, AppResult};
use crate::models::transaction::{
    EarnPointsRequest, SpendPointsRequest, Transaction, TransactionKind,
};
use std::cell::RefCell;
use std::cmp::Reverse;
use std::rc::Rc;

/// Persistence collaborator for the ledger.
pub trait TransactionStore {
    /// Every stored transaction, empty when nothing was saved yet.
    fn load(&self) -> AppResult<Vec<Transaction>>;

    /// Mirror the full in-memory list.
    fn save(&mut self, transactions: &[Transaction]) -> AppResult<()>;
}

/// In-memory store. Clones share the same backing list.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    saved: Rc<RefCell<Vec<Transaction>>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn with(transactions: Vec<Transaction>) -> Self {
        Self {
            saved: Rc::new(RefCell::new(transactions)),
            fail_writes: false,
        }
    }

    /// A store whose every `save` fails.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<Transaction> {
        self.saved.borrow().clone()
    }
}

impl TransactionStore for MemoryStore {
    fn load(&self) -> AppResult<Vec<Transaction>> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&mut self, transactions: &[Transaction]) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Io(std::io::Error::other("storage unavailable")));
        }
        *self.saved.borrow_mut() = transactions.to_vec();
        Ok(())
    }
}

/// Σ earned − Σ spent.
pub fn balance_of(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// Newest first; equal timestamps show the higher id first.
pub fn sorted_history(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by_key(|t| (Reverse(t.timestamp), Reverse(t.id)));
    sorted
}

fn next_id(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|t| t.id).max().map_or(1, |m| m + 1)
}

pub struct PointsLedger<S: TransactionStore> {
    store: S,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    transactions: Vec<Transaction>,
}

impl<S: TransactionStore> PointsLedger<S> {
    /// Load the ledger from its store.
    pub fn open(store: S, clock: Box<dyn Clock>, notifier: Box<dyn Notifier>) -> AppResult<Self> {
        let transactions = store.load()?;
        Ok(Self {
            store,
            clock,
            notifier,
            transactions,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn current_balance(&self) -> i64 {
        balance_of(&self.transactions)
    }

    pub fn history(&self) -> Vec<Transaction> {
        sorted_history(&self.transactions)
    }

    pub fn earn(&mut self, amount: i64, description: &str) -> AppResult<Transaction> {
        if amount <= 0 {
            return Err(AppError::InvalidAmount(amount));
        }

        let balance = self.current_balance();
        if balance.checked_add(amount).is_none() {
            return Err(AppError::PointsOverflow(format!(
                "cannot add {amount} to a balance of {balance}"
            )));
        }

        let tx = self.append(TransactionKind::Earned, amount, description);
        self.notifier
            .notify(&format!("+{} GreenPoints! {}", amount, description));
        Ok(tx)
    }

    pub fn spend(&mut self, amount: i64, description: &str) -> AppResult<Transaction> {
        if amount <= 0 {
            return Err(AppError::InvalidAmount(amount));
        }

        let available = self.current_balance();
        if available < amount {
            return Err(AppError::InsufficientBalance {
                requested: amount,
                available,
            });
        }

        let tx = self.append(TransactionKind::Spent, amount, description);
        self.notifier
            .notify(&format!("-{} GreenPoints! {}", amount, description));
        Ok(tx)
    }

    pub fn earn_request(&mut self, req: &EarnPointsRequest) -> AppResult<Transaction> {
        req.validate()?;
        self.earn(req.amount, req.description.trim())
    }

    pub fn spend_request(&mut self, req: &SpendPointsRequest) -> AppResult<Transaction> {
        req.validate()?;
        self.spend(req.amount, req.description.trim())
    }

    fn append(&mut self, kind: TransactionKind, amount: i64, description: &str) -> Transaction {
        let tx = Transaction {
            id: next_id(&self.transactions),
            kind,
            amount,
            description: description.to_string(),
            timestamp: self.clock.now(),
        };
        self.transactions.push(tx.clone());
        self.persist();

        debug_assert!(
            self.current_balance() >= 0,
            "GreenPoints balance went negative"
        );
        tx
    }

    /// A failed write is reported and swallowed; memory stays authoritative.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.transactions) {
            self.notifier
                .warn(&format!("GreenPoints could not be saved: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::notify::RecordingNotifier;
    use chrono::{DateTime, FixedOffset};

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn ledger_with(store: MemoryStore) -> (PointsLedger<MemoryStore>, FixedClock, RecordingNotifier) {
        let clock = FixedClock::new(at("2025-06-11T09:00:00+04:00"));
        let notifier = RecordingNotifier::default();
        let ledger = PointsLedger::open(
            store,
            Box::new(clock.clone()),
            Box::new(notifier.clone()),
        )
        .unwrap();
        (ledger, clock, notifier)
    }

    fn independent_balance(txs: &[Transaction]) -> i64 {
        let earned: i64 = txs
            .iter()
            .filter(|t| t.kind == TransactionKind::Earned)
            .map(|t| t.amount)
            .sum();
        let spent: i64 = txs
            .iter()
            .filter(|t| t.kind == TransactionKind::Spent)
            .map(|t| t.amount)
            .sum();
        earned - spent
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let (mut ledger, _, _) = ledger_with(MemoryStore::default());
        let a = ledger.earn(200, "Welcome Bonus").unwrap();
        let b = ledger.earn(50, "First Charging Session").unwrap();
        let c = ledger.spend(30, "Coffee voucher").unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
        assert_eq!(c.kind, TransactionKind::Spent);
    }

    #[test]
    fn ids_continue_after_loaded_maximum() {
        let loaded = vec![Transaction {
            id: 7,
            kind: TransactionKind::Earned,
            amount: 10,
            description: "old".into(),
            timestamp: at("2025-06-01T10:00:00+04:00"),
        }];
        let (mut ledger, _, _) = ledger_with(MemoryStore::with(loaded));
        assert_eq!(ledger.earn(5, "new").unwrap().id, 8);
    }

    #[test]
    fn balance_matches_replay_after_mixed_sequence() {
        let (mut ledger, _, _) = ledger_with(MemoryStore::default());
        let ops: [(bool, i64); 8] = [
            (true, 100),
            (false, 40),
            (true, 15),
            (false, 500), // rejected
            (false, 75),
            (true, 3),
            (false, 3),
            (true, 1),
        ];
        for (earn, amount) in ops {
            let _ = if earn {
                ledger.earn(amount, "op")
            } else {
                ledger.spend(amount, "op")
            };
            assert_eq!(
                ledger.current_balance(),
                independent_balance(ledger.transactions())
            );
        }
        assert_eq!(ledger.current_balance(), 1);
        assert_eq!(ledger.transactions().len(), 7);
    }

    #[test]
    fn overspend_is_rejected_and_leaves_state_untouched() {
        let store = MemoryStore::default();
        let (mut ledger, _, notifier) = ledger_with(store.clone());
        ledger.earn(20, "seed").unwrap();
        let before = ledger.transactions().to_vec();

        let err = ledger.spend(21, "too much").unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientBalance {
                requested: 21,
                available: 20
            }
        ));
        assert_eq!(ledger.current_balance(), 20);
        assert_eq!(ledger.transactions(), before.as_slice());
        assert_eq!(store.saved().len(), 1);
        assert_eq!(notifier.messages().len(), 1);
    }

    #[test]
    fn spending_exact_balance_is_allowed() {
        let (mut ledger, _, _) = ledger_with(MemoryStore::default());
        ledger.earn(20, "seed").unwrap();
        ledger.spend(20, "all of it").unwrap();
        assert_eq!(ledger.current_balance(), 0);
    }

    #[test]
    fn non_positive_amounts_are_invalid() {
        let (mut ledger, _, _) = ledger_with(MemoryStore::default());
        ledger.earn(10, "seed").unwrap();
        assert!(matches!(ledger.earn(0, "x"), Err(AppError::InvalidAmount(0))));
        assert!(matches!(ledger.earn(-5, "x"), Err(AppError::InvalidAmount(-5))));
        assert!(matches!(ledger.spend(0, "x"), Err(AppError::InvalidAmount(0))));
        assert!(matches!(ledger.spend(-5, "x"), Err(AppError::InvalidAmount(-5))));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn history_is_newest_first_with_id_tiebreak() {
        let (mut ledger, clock, _) = ledger_with(MemoryStore::default());
        clock.set(at("2025-06-11T10:00:00+00:00"));
        ledger.earn(1, "A").unwrap();
        clock.set(at("2025-06-11T09:00:00+00:00"));
        ledger.earn(2, "B").unwrap();
        clock.set(at("2025-06-11T10:00:00+00:00"));
        ledger.earn(3, "C").unwrap();

        let order: Vec<String> = ledger
            .history()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(order, ["C", "A", "B"]);
    }

    #[test]
    fn history_compares_instants_across_offsets() {
        let (mut ledger, clock, _) = ledger_with(MemoryStore::default());
        clock.set(at("2025-06-11T12:00:00+04:00")); // 08:00Z
        ledger.earn(1, "east").unwrap();
        clock.set(at("2025-06-11T09:00:00+00:00")); // 09:00Z
        ledger.earn(1, "west").unwrap();
        assert_eq!(ledger.history()[0].description, "west");
    }

    #[test]
    fn every_mutation_is_persisted() {
        let store = MemoryStore::default();
        let (mut ledger, _, _) = ledger_with(store.clone());
        ledger.earn(10, "a").unwrap();
        ledger.spend(4, "b").unwrap();
        assert_eq!(store.saved(), ledger.transactions());
    }

    #[test]
    fn lost_writes_are_reported_not_fatal() {
        let (mut ledger, _, notifier) = ledger_with(MemoryStore::failing());
        let tx = ledger.earn(10, "kept in memory").unwrap();
        assert_eq!(tx.id, 1);
        assert_eq!(ledger.current_balance(), 10);
        assert!(
            notifier
                .messages()
                .iter()
                .any(|m| m.starts_with("GreenPoints could not be saved"))
        );
    }

    #[test]
    fn notifies_signed_amounts() {
        let (mut ledger, _, notifier) = ledger_with(MemoryStore::default());
        ledger.earn(50, "Charged 20 kWh at partner station").unwrap();
        ledger.spend(10, "Redeemed").unwrap();
        assert_eq!(
            notifier.messages(),
            [
                "+50 GreenPoints! Charged 20 kWh at partner station",
                "-10 GreenPoints! Redeemed"
            ]
        );
    }

    #[test]
    fn requests_are_validated_before_the_ledger() {
        let (mut ledger, _, _) = ledger_with(MemoryStore::default());
        assert!(ledger
            .earn_request(&EarnPointsRequest::new(10, " "))
            .is_err());
        let tx = ledger
            .earn_request(&EarnPointsRequest::new(10, "  referral  "))
            .unwrap();
        assert_eq!(tx.description, "referral");
        assert!(matches!(
            ledger.spend_request(&SpendPointsRequest::new(11, "x")),
            Err(AppError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn earning_past_the_balance_limit_is_rejected() {
        let (mut ledger, _, notifier) = ledger_with(MemoryStore::default());
        ledger.earn(i64::MAX, "big").unwrap();

        assert!(matches!(
            ledger.earn(1, "one more"),
            Err(AppError::PointsOverflow(_))
        ));
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.current_balance(), i64::MAX);
        assert_eq!(notifier.messages().len(), 1);

        // spending still works and frees room again
        ledger.spend(10, "coffee").unwrap();
        ledger.earn(10, "refill").unwrap();
        assert_eq!(ledger.current_balance(), i64::MAX);
    }
}
