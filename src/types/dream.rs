//! Dream entries and the real-life event they are matched against.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::{today, UNTITLED};
use crate::types::error::{DejavuError, DejavuResult};

/// A dream entry as it arrives from a request body or the dream store.
///
/// Every field is optional here; [`DreamCandidate::from_record`] is the one
/// place where the shape is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DreamRecord {
    /// String or numeric id; numbers are kept in their decimal form.
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Calendar date or RFC 3339 timestamp of the dream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Cached embedding vector, written once by the embedding workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl DreamRecord {
    /// Create a record with a title and content and nothing else.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            content: Some(content.into()),
            date: None,
            embedding: None,
        }
    }

    /// Attach a cached embedding.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Attach a date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

/// One historical dream entry eligible for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct DreamCandidate {
    /// Id used in the response; the 1-based position when the record has none.
    pub id: String,
    /// The record's own id, if it carried one. Only these dreams can receive
    /// a written-back embedding.
    pub store_id: Option<String>,
    pub title: String,
    pub content: String,
    /// The stored date, as given.
    pub date: Option<String>,
    pub embedding: Option<Vec<f32>>,
}

impl DreamCandidate {
    /// Validate a record. `position` is the zero-based index in the request and
    /// supplies the id (1-based) when the record has none.
    pub fn from_record(record: DreamRecord, position: usize) -> DejavuResult<Self> {
        let store_id = record.id.filter(|id| !id.is_empty());
        let id = store_id
            .clone()
            .unwrap_or_else(|| (position + 1).to_string());
        let title = record.title.unwrap_or_default();
        let content = record.content.unwrap_or_default();

        if title.trim().is_empty() && content.trim().is_empty() {
            return Err(DejavuError::EmptyDream(id));
        }

        let date = record
            .date
            .map(|date| date.trim().to_string())
            .filter(|date| !date.is_empty());

        Ok(Self {
            id,
            store_id,
            title,
            content,
            date,
            embedding: record.embedding,
        })
    }

    /// Text sent to the embedding service and used for TF-IDF scoring.
    pub fn text(&self) -> String {
        format!("{}: {}", self.title, self.content)
    }

    /// Text used when extracting shared keywords.
    pub fn keyword_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }

    /// The cached vector, if one is present and non-empty.
    pub fn cached_embedding(&self) -> Option<&[f32]> {
        self.embedding
            .as_deref()
            .filter(|embedding| !embedding.is_empty())
    }

    /// Title for display.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Date for display as `YYYY-MM-DD`. A date that does not parse is shown
    /// as stored; a missing one as today.
    pub fn display_date(&self) -> String {
        match self.date.as_deref() {
            Some(raw) => match parse_date(raw) {
                Some(date) => date.to_string(),
                None => {
                    log::debug!("Keeping unparseable dream date {:?} as stored", raw);
                    raw.to_string()
                }
            },
            None => today().to_string(),
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.date_naive())
}

/// The free-text description of a real-world event submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEvent {
    text: String,
}

impl QueryEvent {
    /// Create a query event, rejecting blank text.
    pub fn new(text: impl Into<String>) -> DejavuResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DejavuError::MissingEvent);
        }
        Ok(Self { text })
    }

    /// The raw event text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
