use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::{Document, ProviderError};

/// Represents a user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The provider-assigned unique identifier, also the document key.
    pub id: String,
    /// The user's full name.
    pub name: String,
    /// The user's email address.
    pub email: String,
}

impl User {
    /// Builds a `User` from its store document, merging the document key in
    /// as the `id` field.
    pub fn from_document(document: Document) -> Result<Self, ProviderError> {
        let mut fields = document.fields;
        fields.insert("id".to_string(), Value::String(document.id));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| ProviderError::Serialization(format!("user document: {e}")))
    }
}
