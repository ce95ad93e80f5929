//! # Domain Model
//!
//! This module defines the data the table works with: [`ClientRecord`] rows, the
//! [`SortCriterion`] keys a user arranges in the sort panel, and the [`Tab`] selector.
//!
//! ## Records Are Read-Only
//!
//! The core never mutates a record. Filtering and sorting produce views (borrowed
//! slices) over the snapshot supplied by the record source.
//!
//! ## Timestamps Stay Text
//!
//! `created_at` / `updated_at` are kept exactly as supplied. They are parsed only when a
//! timestamp criterion compares two records, so one malformed value degrades that
//! comparison to a tie instead of rejecting the whole record set.
//!
//! ## Wire Format
//!
//! Criteria serialize as `{"field": "createdAt", "direction": "asc", "id": "..."}`.
//! The `id` key holds the criterion's instance id (not a record id); lists written in
//! this shape by earlier sessions load unchanged.
//!
//! ## Item Keys
//!
//! Drag surfaces identify panel items by `"{field}-{instance_id}"`, see
//! [`SortCriterion::item_key`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ClientListError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientType {
    Individual,
    Company,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Individual => "Individual",
            ClientType::Company => "Company",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    Active,
    Inactive,
    Pending,
}

/// A single row of the client table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub client_type: ClientType,
    /// Contact string searched by the text filter.
    pub email: String,
    pub status: ClientStatus,
    /// Creation instant as supplied by the source (ISO 8601 expected).
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub updated_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Id,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// All sortable fields, in the order the sort panel offers them.
    pub const ALL: [SortField; 4] = [
        SortField::Name,
        SortField::CreatedAt,
        SortField::UpdatedAt,
        SortField::Id,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Id => "id",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    /// Column heading shown next to the criterion.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Client Name",
            SortField::Id => "Client ID",
            SortField::CreatedAt => "Created At",
            SortField::UpdatedAt => "Updated At",
        }
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, SortField::CreatedAt | SortField::UpdatedAt)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ClientListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ClientListError::InvalidField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One sort key in the panel: a field, a direction and a stable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    pub field: SortField,
    pub direction: SortDirection,
    #[serde(rename = "id")]
    pub instance_id: String,
}

impl SortCriterion {
    /// A new ascending criterion with a fresh instance id.
    pub fn new(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Identity token used by drag surfaces.
    pub fn item_key(&self) -> String {
        format!("{}-{}", self.field.as_str(), self.instance_id)
    }

    /// Toggle button caption.
    ///
    /// Timestamp captions keep the wording users already know, which reads inverted
    /// next to the comparator (ascending puts the oldest first). Only the caption says
    /// so; sorting always treats ascending as smaller-first.
    pub fn direction_label(&self) -> &'static str {
        match (self.field.is_timestamp(), self.direction) {
            (true, SortDirection::Ascending) => "Newest to Oldest",
            (true, SortDirection::Descending) => "Oldest to Newest",
            (false, SortDirection::Ascending) => "A-Z",
            (false, SortDirection::Descending) => "Z-A",
        }
    }
}

/// The category tab above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    All,
    Only(ClientType),
}

impl Tab {
    pub fn matches(&self, record: &ClientRecord) -> bool {
        match self {
            Tab::All => true,
            Tab::Only(client_type) => record.client_type == *client_type,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::All => f.write_str("all"),
            Tab::Only(client_type) => f.write_str(&client_type.as_str().to_lowercase()),
        }
    }
}

impl FromStr for Tab {
    type Err = ClientListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Tab::All);
        }
        [ClientType::Individual, ClientType::Company]
            .into_iter()
            .find(|client_type| client_type.as_str().eq_ignore_ascii_case(trimmed))
            .map(Tab::Only)
            .ok_or_else(|| ClientListError::InvalidTab(s.to_string()))
    }
}
