//! Contact record types shared by the store client and the roster.

use serde::{Deserialize, Deserializer, Serialize};

/// A single contact entry as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Opaque identifier assigned by the store on creation.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Display name. Uniqueness is a client-side concern (checked
    /// case-insensitively on submission); the store never enforces it.
    pub name: String,
    /// Phone number, free-form.
    pub number: String,
}

impl Person {
    /// Case-insensitive name comparison used for duplicate detection.
    pub fn name_matches(&self, candidate: &str) -> bool {
        self.name.to_lowercase() == candidate.to_lowercase()
    }
}

/// Create payload: everything but the id, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDraft {
    /// Display name.
    pub name: String,
    /// Phone number.
    pub number: String,
}

/// Accept both id spellings seen in collection servers: older releases
/// emit numbers, current ones emit strings. Normalised to the string form.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
