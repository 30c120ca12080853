use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use engram_core::errors::{EngramResult, StorageError};
use engram_core::models::{MemoryItem, Metadata};
use engram_core::traits::IVectorStore;

/// Vector store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorOp {
    Add,
    Delete,
    Search,
}

/// Wraps a real vector store and injects `StorageError`s.
///
/// `fail_after(op, n)` lets the first `n` calls of `op` through and fails
/// every later one until `heal` is called.
pub struct FaultyVectorStore {
    inner: Arc<dyn IVectorStore>,
    failing: Mutex<HashSet<VectorOp>>,
    allowance: Mutex<Vec<(VectorOp, usize)>>,
    writes: AtomicUsize,
}

impl FaultyVectorStore {
    pub fn new(inner: Arc<dyn IVectorStore>) -> Self {
        Self {
            inner,
            failing: Mutex::new(HashSet::new()),
            allowance: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Fail every call of `op` from now on.
    pub fn fail(&self, op: VectorOp) {
        self.failing.lock().unwrap().insert(op);
    }

    /// Allow `n` more calls of `op`, then fail.
    pub fn fail_after(&self, op: VectorOp, n: usize) {
        self.allowance.lock().unwrap().push((op, n));
    }

    /// Stop injecting failures.
    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
        self.allowance.lock().unwrap().clear();
    }

    /// Successful add and delete calls that reached the inner store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, op: VectorOp) -> EngramResult<()> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(injected(op));
        }
        let mut allowance = self.allowance.lock().unwrap();
        if let Some(entry) = allowance.iter_mut().find(|(o, _)| *o == op) {
            if entry.1 == 0 {
                return Err(injected(op));
            }
            entry.1 -= 1;
        }
        Ok(())
    }
}

fn injected(op: VectorOp) -> engram_core::EngramError {
    StorageError::SqliteError {
        message: format!("injected {op:?} failure"),
    }
    .into()
}

impl IVectorStore for FaultyVectorStore {
    fn add(&self, id: &str, text: &str, metadata: &Metadata) -> EngramResult<()> {
        self.check(VectorOp::Add)?;
        self.inner.add(id, text, metadata)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete(&self, ids: &[String]) -> EngramResult<()> {
        self.check(VectorOp::Delete)?;
        self.inner.delete(ids)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> EngramResult<Vec<MemoryItem>> {
        self.check(VectorOp::Search)?;
        self.inner.search(query, top_k, min_similarity)
    }

    fn get(&self, id: &str) -> EngramResult<Option<MemoryItem>> {
        self.inner.get(id)
    }

    fn count(&self) -> EngramResult<usize> {
        self.inner.count()
    }
}
