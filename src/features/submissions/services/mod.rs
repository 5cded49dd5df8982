mod submission_service;

pub use submission_service::{
    screenshot_filename, ScreenshotUpload, SubmissionOutcome, SubmissionService,
};
