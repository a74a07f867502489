pub mod config;
pub mod error;
pub mod field;
pub mod locale;
pub mod names;
pub mod record;
pub mod value;
pub mod verdict;

pub use config::{RequirementPolicy, RunConfig};
pub use error::{ConfigError, Result};
pub use field::FieldType;
pub use locale::{Locale, Province};
pub use names::NameLists;
pub use record::{CandidateRecord, Cell, FlatRecord};
pub use value::CanonicalValue;
pub use verdict::{RejectedRow, RejectionReason, RejectionReport, ValidationVerdict};
