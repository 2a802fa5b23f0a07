use std::collections::HashMap;

use crate::catalog::CONDITIONS;
use crate::entry::TreatmentEntry;

/// Read-only condition → treatment table
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: HashMap<String, TreatmentEntry>,
    fallback: TreatmentEntry,
}

impl KnowledgeBase {
    /// Build the table from the hardcoded catalog.
    pub fn builtin() -> Self {
        let kb = Self::from_entries(CONDITIONS.iter().map(|(name, medicines, advice)| {
            ((*name).to_string(), TreatmentEntry::from_static(medicines, advice))
        }));
        tracing::debug!(conditions = kb.len(), "Treatment knowledge base ready");
        kb
    }

    /// Build a table from arbitrary entries.
    ///
    /// Later entries with the same name replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, TreatmentEntry)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            fallback: TreatmentEntry::fallback(),
        }
    }

    /// Guidance for `disease`, or the generic entry when it is unmapped.
    pub fn lookup(&self, disease: &str) -> &TreatmentEntry {
        match self.entries.get(disease) {
            Some(entry) => entry,
            None => {
                tracing::debug!(disease, "No treatment entry, using fallback");
                &self.fallback
            }
        }
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.entries.contains_key(disease)
    }

    /// Known condition names, sorted.
    pub fn conditions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
