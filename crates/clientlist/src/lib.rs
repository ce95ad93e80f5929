//! # Clientlist Architecture
//!
//! Clientlist is the **UI-agnostic core of a client-record table**. A browser page, a
//! terminal UI or a test harness renders the rows; this crate decides which rows exist
//! and in what order.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (table.rs)                                         │
//! │  - Holds records, active tab, search query, sort manager    │
//! │  - rows() recomputes the displayed sequence on demand       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//! ┌──────────────────────────────┐ ┌──────────────────────────────┐
//! │  Pipeline (pipeline.rs,      │ │  Sort criteria (criteria.rs) │
//! │  sorting.rs)                 │ │  - add/remove/reorder/clear  │
//! │  - tab filter, text filter,  │ │  - write-through persistence │
//! │    stable multi-key sort     │ │  - subscriber notification   │
//! │  - pure, never fails         │ │                              │
//! └──────────────────────────────┘ └──────────────────────────────┘
//!                                                  │
//!                                                  ▼
//!                                  ┌──────────────────────────────┐
//!                                  │  Storage (store/)            │
//!                                  │  - PersistenceSlot trait     │
//!                                  │  - FsSlot, MemSlot           │
//!                                  └──────────────────────────────┘
//! ```
//!
//! ## Key Principle: Derived State Is Pure
//!
//! The only durable state is the ordered list of sort criteria. Everything the user sees
//! is derived from four inputs (records, tab, query, criteria) by [`pipeline::run`],
//! which has no hidden state and can be re-run on every input change.
//!
//! ## Error Policy
//!
//! Nothing in the display path fails. Bad persisted data becomes an empty criteria
//! list, stale UI gestures become no-ops, and unparsable timestamps compare as ties.
//! Only explicit storage calls and text parsing return [`error::Result`].
//!
//! ## Module Overview
//!
//! - [`model`]: Records, sort fields, directions, criteria and tabs
//! - [`criteria`]: The sort criteria manager
//! - [`pipeline`]: The filter + sort pipeline
//! - [`sorting`]: Record comparators
//! - [`table`]: The table session tying it together
//! - [`store`]: Persistence slots
//! - [`config`]: Configuration
//! - [`init`]: Context setup with filesystem persistence
//! - [`error`]: Error types

pub mod config;
pub mod criteria;
pub mod error;
pub mod init;
pub mod model;
pub mod pipeline;
pub mod sorting;
pub mod store;
pub mod table;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
