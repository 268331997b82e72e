pub mod assignment_editor;
pub mod assignment_store;
pub mod file_transfer;
pub mod grading;
pub mod submission_store;

pub use assignment_editor::AssignmentEditor;
pub use assignment_store::AssignmentStore;
pub use file_transfer::FileTransferAgent;
pub use grading::GradingCoordinator;
pub use submission_store::SubmissionStore;
