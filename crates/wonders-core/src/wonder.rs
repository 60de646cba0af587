//! The Wonder record and its wire-side draft

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::DraftError;

/// A landmark record, the sole entity managed by the catalog.
///
/// `id` is assigned by the store and immutable once set. `discovery_year` may
/// be negative to denote BCE dates. Output JSON uses fixed camelCase field
/// names (`discoveryYear`, `type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wonder {
    /// Store-assigned unique identifier
    pub id: i64,

    /// Name of the wonder (required, non-empty)
    pub name: String,

    /// Country where the wonder is located
    pub country: String,

    /// Historical era
    pub era: String,

    /// Kind of wonder (serialized as `type`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Short description
    pub description: String,

    /// Year the wonder was discovered or built; negative means BCE
    pub discovery_year: i64,
}

impl Wonder {
    /// Build a record from a draft with the id the store assigned.
    pub fn from_draft(id: i64, draft: WonderDraft) -> Self {
        Self {
            id,
            name: draft.name,
            country: draft.country,
            era: draft.era,
            kind: draft.kind,
            description: draft.description,
            discovery_year: draft.discovery_year,
        }
    }

    /// Overwrite every mutable field from the draft, keeping the id.
    pub fn apply(&mut self, draft: WonderDraft) {
        self.name = draft.name;
        self.country = draft.country;
        self.era = draft.era;
        self.kind = draft.kind;
        self.description = draft.description;
        self.discovery_year = draft.discovery_year;
    }
}

/// A wonder payload as it arrives on the wire or in the seed file.
///
/// Field names match ASCII case-insensitively. Missing text fields default to
/// empty, a missing id or discovery year defaults to zero. A client-supplied
/// id is advisory only: the store ignores it on insert, and update uses it
/// solely for the route/body mismatch check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WonderDraft {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub era: String,
    pub kind: String,
    pub description: String,
    pub discovery_year: i64,
}

impl WonderDraft {
    /// Decode a draft from a JSON value with case-insensitive field matching.
    ///
    /// Unknown fields are ignored; explicit `null` counts as absent.
    pub fn from_value(value: &Value) -> Result<Self, DraftError> {
        let object = value.as_object().ok_or(DraftError::NotAnObject)?;
        let mut draft = WonderDraft::default();
        for (key, val) in object {
            match key.to_ascii_lowercase().as_str() {
                "id" => draft.id = integer_field(val, key)?,
                "name" => draft.name = text_field(val, key)?,
                "country" => draft.country = text_field(val, key)?,
                "era" => draft.era = text_field(val, key)?,
                "type" => draft.kind = text_field(val, key)?,
                "description" => draft.description = text_field(val, key)?,
                "discoveryyear" => draft.discovery_year = integer_field(val, key)?,
                _ => {}
            }
        }
        Ok(draft)
    }
}

impl<'de> Deserialize<'de> for WonderDraft {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        WonderDraft::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn text_field(value: &Value, field: &str) -> Result<String, DraftError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(DraftError::ExpectedString(field.to_string())),
    }
}

fn integer_field(value: &Value, field: &str) -> Result<i64, DraftError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| DraftError::ExpectedInteger(field.to_string())),
        Value::Null => Ok(0),
        _ => Err(DraftError::ExpectedInteger(field.to_string())),
    }
}
