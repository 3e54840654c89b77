//! Data models for the harvest pipeline.
//!
//! Raw API response types live next to the domain types they are converted
//! into at ingestion:
//!
//! - `Student`: one roster member, flattened out of the raw group records
//! - `Track`, `AssignmentName`, `Assignment`: the assignment catalog
//! - `RawSignoff`: signoff history entries

pub mod assignment;
pub mod signoff;
pub mod student;

pub use assignment::{Assignment, AssignmentName, CatalogResponse, RawAssignment, Track};
pub use signoff::RawSignoff;
pub use student::{flatten_roster, group_category, RawGroup, RawGroupSet, RawParticipant, RawPerson, Student};
