pub mod assignment;
pub mod file;
pub mod proposal;
pub mod submission;

pub use assignment::{Assignment, AssignmentDraft};
pub use file::{DownloadTarget, UploadFile, UploadTarget};
pub use proposal::{GradeCycle, GradingProposal};
pub use submission::{GradeState, Submission, SubmissionWire, UNGRADED_SENTINEL};
