use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Fixed category attached to every note.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Older deployments of the notes API returned numeric ids.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// The not-yet-submitted note the user is editing.
///
/// Always complete: every field has a value, the empty draft included.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum DraftField {
    Title,
    Content,
    Tag,
}

impl NoteDraft {
    /// Merge one raw field edit into a complete draft.
    ///
    /// A tag that does not parse keeps the previous tag.
    pub fn with_field(&self, field: DraftField, value: &str) -> NoteDraft {
        let mut next = self.clone();
        match field {
            DraftField::Title => next.title = value.to_string(),
            DraftField::Content => next.content = value.to_string(),
            DraftField::Tag => {
                if let Ok(tag) = value.parse::<NoteTag>() {
                    next.tag = tag;
                }
            }
        }
        next
    }
}

/// Form field state before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RawNoteFields {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl From<&NoteDraft> for RawNoteFields {
    fn from(d: &NoteDraft) -> Self {
        Self {
            title: d.title.clone(),
            content: d.content.clone(),
            tag: d.tag.to_string(),
        }
    }
}

/// Validated create-note payload; field names are the `POST /notes` body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NoteFormValues {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FetchNotesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FetchNotesResponse {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total_pages: u32,
}
