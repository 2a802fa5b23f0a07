use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Medicines shown for conditions missing from the table
pub const DEFAULT_MEDICINES: &[&str] = &["Consult doctor for specific treatment"];

/// Advice shown for conditions missing from the table
pub const DEFAULT_ADVICE: &[&str] = &["Schedule appointment with healthcare provider"];

/// Treatment guidance for a single condition.
///
/// Both lists are in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TreatmentEntry {
    /// Medicines and dosage instructions
    #[schema(example = json!(["Acetaminophen 500mg - Every 6 hours"]))]
    pub medicines: Vec<String>,
    /// Lifestyle and follow-up advice
    #[schema(example = json!(["REST: Extra sleep"]))]
    pub advice: Vec<String>,
}

impl TreatmentEntry {
    /// Build an entry from static string slices.
    pub fn from_static(medicines: &[&str], advice: &[&str]) -> Self {
        Self {
            medicines: medicines.iter().map(|s| (*s).to_string()).collect(),
            advice: advice.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// The generic entry returned for unmapped conditions.
    pub fn fallback() -> Self {
        Self::from_static(DEFAULT_MEDICINES, DEFAULT_ADVICE)
    }
}
