//! Treatment guidance reference table for MediCare AI
//!
//! Maps a predicted condition name to the medicines and advice shown to the
//! patient next to a diagnosis. The table is hardcoded, built once at process
//! start and never mutated afterwards, so a single [`KnowledgeBase`] can be
//! shared read-only across every request.
//!
//! Lookups are total: a condition the table does not know receives a generic
//! "see a doctor" entry instead of an error.
//!
//! # Example
//!
//! ```rust
//! use treatment_knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin();
//!
//! let asthma = kb.lookup("Asthma");
//! assert!(asthma.medicines[0].starts_with("Albuterol"));
//!
//! let unknown = kb.lookup("Dragon Pox");
//! assert_eq!(unknown.medicines, vec!["Consult doctor for specific treatment"]);
//! ```

pub mod catalog;
pub mod entry;
pub mod knowledge_base;

pub use entry::*;
pub use knowledge_base::*;
