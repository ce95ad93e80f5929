use super::PersistenceSlot;
use crate::error::{ClientListError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory persistence slot.
///
/// Uses `RefCell` for interior mutability since the table core is single-threaded.
/// This keeps the `PersistenceSlot` trait on `&self` without paying for a lock.
#[derive(Debug, Default)]
pub struct MemSlot {
    items: RefCell<HashMap<String, String>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `value` under `key`.
    pub fn with_item(key: &str, value: &str) -> Self {
        let slot = Self::default();
        slot.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        slot
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of successful writes, for asserting write-through behaviour.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl PersistenceSlot for MemSlot {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ClientListError::Store("Simulated write error".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let slot = MemSlot::new();
        assert_eq!(slot.get_item("nope").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let slot = MemSlot::new();
        slot.set_item("k", "[]").unwrap();
        assert_eq!(slot.get_item("k").unwrap().as_deref(), Some("[]"));
        assert_eq!(slot.write_count(), 1);
    }

    #[test]
    fn test_simulated_write_error() {
        let slot = MemSlot::with_item("k", "old");
        slot.set_simulate_write_error(true);
        assert!(slot.set_item("k", "new").is_err());
        assert_eq!(slot.get_item("k").unwrap().as_deref(), Some("old"));
        assert_eq!(slot.write_count(), 0);
    }
}
