//! # Table Session
//!
//! [`ClientTable`] is what a page holds for one session: the record snapshot, the
//! active tab, the search query, and the [`SortCriteriaManager`].
//!
//! Instead of re-rendering on an implicit state-change graph, callers mutate one
//! input (`set_tab`, `set_query`, `criteria_mut().add(..)`, ...) and ask for
//! [`ClientTable::rows`] again. `rows` is a pure derivation via [`pipeline::run`].

use crate::criteria::SortCriteriaManager;
use crate::model::{ClientRecord, SortCriterion, Tab};
use crate::pipeline;
use crate::store::PersistenceSlot;

/// Something that supplies the table's records, in display order.
pub trait RecordSource {
    fn records(&self) -> Vec<ClientRecord>;
}

impl RecordSource for [ClientRecord] {
    fn records(&self) -> Vec<ClientRecord> {
        self.to_vec()
    }
}

impl RecordSource for Vec<ClientRecord> {
    fn records(&self) -> Vec<ClientRecord> {
        self.clone()
    }
}

#[derive(Debug)]
pub struct ClientTable<S: PersistenceSlot> {
    records: Vec<ClientRecord>,
    tab: Tab,
    query: String,
    criteria: SortCriteriaManager<S>,
}

impl<S: PersistenceSlot> ClientTable<S> {
    pub fn new(records: Vec<ClientRecord>, criteria: SortCriteriaManager<S>) -> Self {
        Self {
            records,
            tab: Tab::All,
            query: String::new(),
            criteria,
        }
    }

    pub fn from_source<R>(source: &R, criteria: SortCriteriaManager<S>) -> Self
    where
        R: RecordSource + ?Sized,
    {
        Self::new(source.records(), criteria)
    }

    /// Swap in a freshly fetched record snapshot. Tab, query and criteria are kept.
    pub fn set_records(&mut self, records: Vec<ClientRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn criteria(&self) -> &SortCriteriaManager<S> {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut SortCriteriaManager<S> {
        &mut self.criteria
    }

    /// Number shown on the sort button badge.
    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    /// The rows to display for the current tab, query and criteria.
    pub fn rows(&self) -> Vec<&ClientRecord> {
        self.rows_with(self.criteria.criteria())
    }

    /// Rows for an explicit criteria snapshot, e.g. a panel previewing edits.
    pub fn rows_with(&self, criteria: &[SortCriterion]) -> Vec<&ClientRecord> {
        pipeline::run(&self.records, self.tab, &self.query, criteria)
    }
}
