use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::provider::{Document, ProviderError};

/// Represents one practice interview.
///
/// Only the fields the query layer filters and orders on are typed here;
/// feedback and content fields are carried through opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    /// The document key.
    pub id: String,
    /// The uid of the user who took the interview.
    pub user_id: String,
    /// When the interview was created; the ordering key.
    pub created_at: DateTime<Utc>,
    /// Whether feedback/scoring has completed and is ready for display.
    #[serde(default)]
    pub finalized: bool,
    /// Remaining document fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Interview {
    /// Builds an `Interview` from its store document, merging the document
    /// key in as the `id` field.
    pub fn from_document(document: Document) -> Result<Self, ProviderError> {
        let mut fields = document.fields;
        fields.insert("id".to_string(), Value::String(document.id));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| ProviderError::Serialization(format!("interview document: {e}")))
    }
}
