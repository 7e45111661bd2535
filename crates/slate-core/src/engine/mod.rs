//! The engines — domain operations over the storage ports.
//!
//! Each engine owns the invariants of one resource: the roster engine
//! gates class mutation on ownership, the assignment engine pairs record
//! mutation with artifact cleanup, and the submission engine enforces
//! the due-date window.

pub mod assignment;
pub mod roster;
pub mod submission;

pub use assignment::AssignmentEngine;
pub use roster::RosterEngine;
pub use submission::SubmissionEngine;
