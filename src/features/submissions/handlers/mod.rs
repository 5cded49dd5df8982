pub mod form_handler;
pub mod submission_handler;

pub use submission_handler::SubmissionState;
