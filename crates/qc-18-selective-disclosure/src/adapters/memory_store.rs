//! In-Memory Transaction Store
//!
//! Implements the `TransactionStorage` port over a bounded LRU cache.
//! Least recently used transactions are evicted once `capacity` is reached.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use shared_crypto::Hash;
use tracing::debug;

use crate::domain::TransactionCommitment;
use crate::ports::{StoreError, TransactionStorage};

/// Bounded in-memory transaction store.
pub struct InMemoryTransactionStore {
    /// Transactions by id. `LruCache::get` promotes, so reads need the lock too.
    transactions: Mutex<LruCache<Hash, TransactionCommitment>>,
}

impl InMemoryTransactionStore {
    /// Create a store holding at most `capacity` transactions (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            transactions: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Record a transaction under its id. Returns the id.
    pub fn insert(&self, transaction: impl Into<TransactionCommitment>) -> Hash {
        let transaction = transaction.into();
        let id = transaction.id();
        if let Some((evicted, _)) = self.transactions.lock().push(id, transaction) {
            if evicted != id {
                debug!(evicted = %hex::encode(&evicted[..8]), "transaction evicted");
            }
        }
        id
    }

    /// Whether `id` is held.
    pub fn contains(&self, id: &Hash) -> bool {
        self.transactions.lock().contains(id)
    }

    /// Number of transactions held.
    pub fn len(&self) -> usize {
        self.transactions.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.lock().is_empty()
    }
}

impl TransactionStorage for InMemoryTransactionStore {
    fn get_transaction(&self, id: &Hash) -> Result<Option<TransactionCommitment>, StoreError> {
        Ok(self.transactions.lock().get(id).cloned())
    }
}
