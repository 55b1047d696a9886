//! Dream store backed by a JSON array on disk.

use std::path::{Path, PathBuf};

use super::DreamStore;
use crate::embedding::FetchedEmbedding;
use crate::types::{DejavuError, DejavuResult, DreamRecord};

/// A JSON file holding an array of dream records.
pub struct JsonDreamStore {
    path: PathBuf,
    records: Vec<DreamRecord>,
}

impl JsonDreamStore {
    /// Read a store file.
    pub fn open(path: &Path) -> DejavuResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<DreamRecord> = serde_json::from_str(&content)?;
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Create a store file with the given records.
    pub fn create(path: &Path, records: Vec<DreamRecord>) -> DejavuResult<Self> {
        let store = Self {
            path: path.to_path_buf(),
            records,
        };
        store.save()?;
        Ok(store)
    }

    /// Number of stored dreams.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no dreams.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all records, replacing the file via a sibling temp file.
    pub fn save(&self) -> DejavuResult<()> {
        let content = serde_json::to_string_pretty(&self.records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn set_embedding(&mut self, dream_id: &str, embedding: &[f32]) -> DejavuResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|d| d.id.as_deref() == Some(dream_id))
            .ok_or_else(|| DejavuError::DreamNotFound(dream_id.to_string()))?;
        record.embedding = Some(embedding.to_vec());
        Ok(())
    }
}

impl DreamStore for JsonDreamStore {
    fn dreams(&self) -> DejavuResult<Vec<DreamRecord>> {
        Ok(self.records.clone())
    }

    fn put_embedding(&mut self, dream_id: &str, embedding: &[f32]) -> DejavuResult<()> {
        self.set_embedding(dream_id, embedding)?;
        self.save()
    }

    /// Applies every vector whose dream exists, saves once, then reports the
    /// first dream that was not found.
    fn put_embeddings(&mut self, fetched: &[FetchedEmbedding]) -> DejavuResult<()> {
        let mut first_missing = None;
        let mut applied = 0;
        for item in fetched {
            match self.set_embedding(&item.dream_id, &item.embedding) {
                Ok(()) => applied += 1,
                Err(e) => {
                    first_missing.get_or_insert(e);
                }
            }
        }
        if applied > 0 {
            self.save()?;
        }
        match first_missing {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
