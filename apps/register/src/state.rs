//! # Register State
//!
//! Shared ownership wrappers: the current [`Transaction`] and the
//! single in-flight catalog call flag.
//!
//! ## Thread Safety
//! The transaction is wrapped in `Arc<Mutex<T>>`: mutations happen on a
//! single logical thread of control, but the session and a front-end
//! bridge may both hold handles, and only one may touch the transaction
//! at a time.
//!
//! ## Why Not RwLock?
//! Transaction operations are quick and most of them write. A RwLock
//! would add complexity with minimal benefit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use kirana_core::Transaction;

/// Shared handle to the current transaction.
#[derive(Debug, Clone, Default)]
pub struct TransactionState {
    txn: Arc<Mutex<Transaction>>,
}

impl TransactionState {
    /// Creates state holding a new empty transaction.
    pub fn new() -> Self {
        TransactionState {
            txn: Arc::new(Mutex::new(Transaction::new())),
        }
    }

    /// Executes a function with read access to the transaction.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = state.with_txn(|t| t.summary());
    /// ```
    pub fn with_txn<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Transaction) -> R,
    {
        let txn = self.txn.lock().expect("Transaction mutex poisoned");
        f(&txn)
    }

    /// Executes a function with write access to the transaction.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_txn_mut(|t| t.set_quantity(3))?;
    /// ```
    pub fn with_txn_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Transaction) -> R,
    {
        let mut txn = self.txn.lock().expect("Transaction mutex poisoned");
        f(&mut txn)
    }
}

// =============================================================================
// Busy Flag
// =============================================================================

/// The single in-flight catalog call flag.
///
/// This system never needs more than one outstanding catalog call, so one
/// shared boolean is the whole concurrency story. [`BusyFlag::acquire`]
/// flips it atomically; the returned guard clears it on drop, so the flag
/// cannot stay stuck when the call resolves, rejects, or is abandoned
/// mid-flight.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    /// Creates a cleared flag.
    pub fn new() -> Self {
        BusyFlag::default()
    }

    /// Whether a call is currently in flight.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Claims the flag, or returns `None` if a call is already in flight.
    pub fn acquire(&self) -> Option<BusyGuard> {
        if self.0.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(BusyGuard(Arc::clone(&self.0)))
        }
    }
}

/// Clears the busy flag when dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kirana_core::Item;

    #[test]
    fn test_handles_share_one_transaction() {
        let state = TransactionState::new();
        let other = state.clone();

        state.with_txn_mut(|t| {
            t.add_item(&Item {
                barcode: "1234567890123".to_string(),
                description: "Dove Soap Original 100g".to_string(),
                qty: 1,
                weight: 0.1,
                price_paise: 2500,
            })
        });

        assert_eq!(other.with_txn(|t| t.items().len()), 1);
    }

    #[test]
    fn test_busy_flag_single_holder() {
        let flag = BusyFlag::new();
        assert!(!flag.is_set());

        let guard = flag.acquire().unwrap();
        assert!(flag.is_set());
        assert!(flag.acquire().is_none());

        drop(guard);
        assert!(!flag.is_set());
        assert!(flag.acquire().is_some());
    }
}
