//! # Sort Criteria Manager
//!
//! [`SortCriteriaManager`] owns the ordered list of active [`SortCriterion`]s. The
//! list order is the sort precedence: the first criterion is the primary key.
//!
//! ## Invariant
//!
//! At most one criterion per [`SortField`]. `add` of a field that is already present
//! is ignored, and lists loaded from storage are de-duplicated (first one wins). A
//! repaired list is written back so the slot holds it from then on.
//!
//! ## Stale Gestures Are No-Ops
//!
//! Every mutation that references something that is not there (unknown instance id,
//! out-of-range index, duplicate field) returns `false` and changes nothing. Such
//! calls only come from a panel rendered against an older snapshot, so they are
//! logged at debug level and otherwise ignored.
//!
//! ## Write-Through Persistence
//!
//! Each mutation that changes the list:
//! 1. Writes the whole list to the persistence slot as a JSON array.
//! 2. Notifies every subscriber with the new snapshot.
//!
//! A failed write is logged and absorbed; the in-memory list stays authoritative for
//! the rest of the session. Loading never fails: absent, unreadable or malformed
//! stored text yields an empty list.
//!
//! ## Drag Surfaces
//!
//! Drag-and-drop libraries report `(dragged item, item dropped on)` using the
//! [`SortCriterion::item_key`] token. [`SortCriteriaManager::handle_drop`] maps those
//! keys to positions and performs an array move; a drop without a valid target is
//! discarded.

use std::collections::HashSet;
use std::fmt;

use crate::error::Result;
use crate::model::{SortCriterion, SortDirection, SortField};
use crate::store::PersistenceSlot;

/// Handle returned by [`SortCriteriaManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[SortCriterion])>;

pub struct SortCriteriaManager<S: PersistenceSlot> {
    slot: S,
    key: String,
    criteria: Vec<SortCriterion>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: PersistenceSlot> fmt::Debug for SortCriteriaManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortCriteriaManager")
            .field("key", &self.key)
            .field("criteria", &self.criteria)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S: PersistenceSlot> SortCriteriaManager<S> {
    /// Create a manager over `slot` and load whatever is stored under `key`.
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        let mut manager = Self {
            slot,
            key: key.into(),
            criteria: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        manager.load();
        manager
    }

    /// The current snapshot, in precedence order.
    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn contains(&self, field: SortField) -> bool {
        self.criteria.iter().any(|c| c.field == field)
    }

    /// Fields that can still be added, in panel order.
    pub fn available_fields(&self) -> Vec<SortField> {
        SortField::ALL
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn position_of(&self, instance_id: &str) -> Option<usize> {
        self.criteria
            .iter()
            .position(|c| c.instance_id == instance_id)
    }

    pub fn position_of_key(&self, item_key: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c.item_key() == item_key)
    }

    // --- Mutations ---

    /// Append an ascending criterion for `field` as the lowest-precedence key.
    pub fn add(&mut self, field: SortField) -> bool {
        if self.contains(field) {
            tracing::debug!(field = %field, "sort field already present, ignoring add");
            return false;
        }
        self.criteria.push(SortCriterion::new(field));
        self.commit();
        true
    }

    pub fn remove(&mut self, instance_id: &str) -> bool {
        let Some(pos) = self.position_of(instance_id) else {
            tracing::debug!(instance_id, "unknown criterion, ignoring remove");
            return false;
        };
        self.criteria.remove(pos);
        self.commit();
        true
    }

    /// Remove the criterion a drag surface knows as `item_key`.
    pub fn remove_by_key(&mut self, item_key: &str) -> bool {
        let Some(pos) = self.position_of_key(item_key) else {
            tracing::debug!(item_key, "unknown item key, ignoring remove");
            return false;
        };
        self.criteria.remove(pos);
        self.commit();
        true
    }

    /// Move the criterion at `from` to `to`, shifting the ones in between.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.criteria.len();
        if from >= len || to >= len {
            tracing::debug!(from, to, len, "reorder index out of range, ignoring");
            return false;
        }
        if from == to {
            return false;
        }
        let moved = self.criteria.remove(from);
        self.criteria.insert(to, moved);
        self.commit();
        true
    }

    /// Apply a finished drag gesture.
    ///
    /// `dropped_on` is `None` when the item was released outside any target.
    pub fn handle_drop(&mut self, dragged: &str, dropped_on: Option<&str>) -> bool {
        let Some(target) = dropped_on else {
            return false;
        };
        if target == dragged {
            return false;
        }
        match (self.position_of_key(dragged), self.position_of_key(target)) {
            (Some(from), Some(to)) => self.reorder(from, to),
            _ => {
                tracing::debug!(dragged, target, "drop references unknown items, ignoring");
                false
            }
        }
    }

    pub fn set_direction(&mut self, instance_id: &str, direction: SortDirection) -> bool {
        let Some(criterion) = self
            .criteria
            .iter_mut()
            .find(|c| c.instance_id == instance_id)
        else {
            tracing::debug!(instance_id, "unknown criterion, ignoring direction change");
            return false;
        };
        if criterion.direction == direction {
            return false;
        }
        criterion.direction = direction;
        self.commit();
        true
    }

    /// Flip ascending/descending, as the panel's direction button does.
    pub fn toggle_direction(&mut self, instance_id: &str) -> bool {
        let Some(current) = self
            .criteria
            .iter()
            .find(|c| c.instance_id == instance_id)
            .map(|c| c.direction)
        else {
            tracing::debug!(instance_id, "unknown criterion, ignoring toggle");
            return false;
        };
        self.set_direction(instance_id, current.toggled())
    }

    pub fn clear_all(&mut self) -> bool {
        if self.criteria.is_empty() {
            return false;
        }
        self.criteria.clear();
        self.commit();
        true
    }

    // --- Persistence ---

    /// Replace the list with what the slot holds.
    ///
    /// Never fails: absent or malformed data becomes an empty list.
    pub fn load(&mut self) -> &[SortCriterion] {
        let (criteria, repaired) = self.read_stored();
        self.criteria = criteria;
        if repaired {
            if let Err(e) = self.save() {
                tracing::warn!(key = %self.key, error = %e, "failed to save repaired sort criteria");
            }
        }
        self.notify();
        &self.criteria
    }

    /// Write the current list to the slot.
    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string(&self.criteria)?;
        self.slot.set_item(&self.key, &text)
    }

    /// Stored list plus whether it had to be repaired.
    fn read_stored(&self) -> (Vec<SortCriterion>, bool) {
        let text = match self.slot.get_item(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved sort criteria");
                return (Vec::new(), false);
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read saved sort criteria");
                return (Vec::new(), false);
            }
        };

        let parsed: Vec<SortCriterion> = match serde_json::from_str(&text) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to parse saved sort criteria");
                return (Vec::new(), false);
            }
        };

        let mut seen = HashSet::new();
        let total = parsed.len();
        let deduped: Vec<SortCriterion> = parsed
            .into_iter()
            .filter(|c| seen.insert(c.field))
            .collect();
        let repaired = deduped.len() != total;
        if repaired {
            tracing::warn!(
                key = %self.key,
                dropped = total - deduped.len(),
                "saved sort criteria repeated a field, keeping the first of each"
            );
        }
        (deduped, repaired)
    }

    fn commit(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!(key = %self.key, error = %e, "failed to save sort criteria");
        }
        self.notify();
    }

    // --- Subscribers ---

    /// Register a callback invoked with the new snapshot after every change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[SortCriterion]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        let snapshot = &self.criteria;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(snapshot);
        }
    }
}
