//! Domain types for the tea inventory.
//!
//! The remote schema is Amplify-managed: records carry a server-assigned
//! `id` plus `createdAt`/`updatedAt` timestamps the client never writes.
//! Mutation inputs are separate, trimmed types so nothing beyond the
//! schema's input fields ever goes on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tea in the collection.
///
/// `id` is `None` for records created locally but not yet acknowledged by
/// the remote store. It is assigned exactly once, by the store, and local
/// mutations never change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeaRecord {
    /// Server-assigned identifier; absent until the create is acknowledged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Remaining bag count
    pub bags: u32,
    /// Server-managed creation timestamp (passthrough, never sent)
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-managed update timestamp (passthrough, never sent)
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TeaRecord {
    /// Build a local, not-yet-synced record (no `id`, no timestamps).
    pub fn local(name: impl Into<String>, bags: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            bags,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Input payload for the remote `createTea` mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTea {
    pub name: String,
    pub bags: u32,
}

/// Input payload for the remote `updateTea` mutation.
///
/// Exactly `{id, name, bags}` - the schema's update input takes no other
/// fields, so the type carries no other fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateTea {
    pub id: String,
    pub name: String,
    pub bags: u32,
}

/// Which draft field a `set_input` call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Bags,
}

/// The pending-input buffer backing the add form.
///
/// Both fields are raw strings; `bags` only becomes an integer at the
/// `add` boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeaDraft {
    pub name: String,
    pub bags: String,
}

impl TeaDraft {
    /// Overwrite one field with a new value.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        match field {
            DraftField::Name => self.name = value.into(),
            DraftField::Bags => self.bags = value.into(),
        }
    }

    /// Clear both fields back to the initial empty state.
    pub fn reset(&mut self) {
        self.name.clear();
        self.bags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_payload_is_exactly_id_name_bags() {
        let input = UpdateTea {
            id: "abc123".to_string(),
            name: "Oolong".to_string(),
            bags: 2,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({"id": "abc123", "name": "Oolong", "bags": 2}));
    }

    #[test]
    fn test_create_payload_is_exactly_name_bags() {
        let input = CreateTea {
            name: "Sencha".to_string(),
            bags: 10,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({"name": "Sencha", "bags": 10}));
    }

    #[test]
    fn test_local_record_serializes_without_id_or_timestamps() {
        let record = TeaRecord::local("Green", 3);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"name": "Green", "bags": 3}));
    }

    #[test]
    fn test_record_deserializes_server_fields() {
        let record: TeaRecord = serde_json::from_str(
            r#"{
                "id": "abc123",
                "name": "Oolong",
                "bags": 3,
                "createdAt": "2024-03-01T10:00:00.000Z",
                "updatedAt": "2024-03-02T11:30:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("abc123"));
        assert_eq!(record.name, "Oolong");
        assert_eq!(record.bags, 3);
        assert!(record.created_at.is_some());
        assert!(record.updated_at.is_some());
    }

    #[test]
    fn test_draft_set_and_reset() {
        let mut draft = TeaDraft::default();
        draft.set(DraftField::Name, "Earl Grey");
        draft.set(DraftField::Bags, "12");
        assert_eq!(draft.name, "Earl Grey");
        assert_eq!(draft.bags, "12");

        draft.reset();
        assert_eq!(draft, TeaDraft::default());
    }
}
