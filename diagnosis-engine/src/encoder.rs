use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::error::{EngineError, EngineResult};

/// Class index ↔ disease name mapping fit alongside the classifier.
///
/// Deserializes from either `{"classes": [...]}` or a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

/// Accepted on-disk layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum EncoderFile {
    Wrapped { classes: Vec<String> },
    Bare(Vec<String>),
}

impl<'de> Deserialize<'de> for LabelEncoder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let classes = match EncoderFile::deserialize(deserializer)? {
            EncoderFile::Wrapped { classes } | EncoderFile::Bare(classes) => classes,
        };
        Self::new(classes).map_err(serde::de::Error::custom)
    }
}

impl LabelEncoder {
    /// # Errors
    ///
    /// [`EngineError::InvalidEncoder`] for an empty class list or a
    /// duplicated class name.
    pub fn new(classes: Vec<String>) -> EngineResult<Self> {
        if classes.is_empty() {
            return Err(EngineError::InvalidEncoder("no classes".to_string()));
        }

        let mut index = HashMap::with_capacity(classes.len());
        for (i, name) in classes.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(EngineError::InvalidEncoder(format!(
                    "class '{name}' appears more than once"
                )));
            }
        }

        Ok(Self { classes, index })
    }

    /// Disease name for a class index.
    ///
    /// # Errors
    ///
    /// [`EngineError::ClassOutOfRange`] if `index` is past the last class.
    pub fn decode(&self, index: usize) -> EngineResult<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(EngineError::ClassOutOfRange {
                index,
                classes: self.classes.len(),
            })
    }

    /// Class index for a disease name.
    pub fn encode(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
