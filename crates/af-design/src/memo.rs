//! Single-evaluation cells for derived attributes.
//!
//! Component attributes form an acyclic dependency graph and any one of
//! them may be read many times while a report is assembled. Each
//! attribute therefore lives in a [`Memo`]: the first read runs the
//! formula, every later read clones the stored result, errors included.

use std::cell::{Cell, OnceCell};

use crate::error::DesignResult;

/// A lazily computed, cached attribute value.
///
/// Not `Sync`; components are built, queried, and dropped on one thread.
#[derive(Debug)]
pub struct Memo<T> {
    cell: OnceCell<DesignResult<T>>,
    computations: Cell<u32>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
            computations: Cell::new(0),
        }
    }
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the formula has actually run (0 or 1).
    pub fn computations(&self) -> u32 {
        self.computations.get()
    }
}

impl<T: Clone> Memo<T> {
    /// Returns the cached result, running `compute` on the first call only.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> DesignResult<T>) -> DesignResult<T> {
        self.cell
            .get_or_init(|| {
                self.computations.set(self.computations.get() + 1);
                compute()
            })
            .clone()
    }
}
