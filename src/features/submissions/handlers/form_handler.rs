use axum::{
    extract::{Multipart, State},
    response::Html,
};
use minijinja::{context, Environment};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::submissions::dtos::REQUIRED_FIELDS_WARNING;
use crate::features::submissions::handlers::submission_handler::{
    extract_submission, SubmissionState,
};

/// Banner shown above the form after a submit
struct FormStatus {
    kind: &'static str,
    message: String,
    screenshot_link: String,
    screenshot_warning: Option<String>,
}

impl FormStatus {
    fn none() -> Self {
        Self {
            kind: "none",
            message: String::new(),
            screenshot_link: String::new(),
            screenshot_warning: None,
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: "warning",
            message: message.into(),
            ..Self::none()
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
            ..Self::none()
        }
    }
}

/// Render the submission form page
pub async fn show_form(State(state): State<SubmissionState>) -> Result<Html<String>, AppError> {
    render_form(&state.templates, FormStatus::none())
}

/// Handle a browser form submit and re-render the page with a
/// success / warning / error banner.
pub async fn submit_form(
    State(state): State<SubmissionState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let (form, screenshot) = match extract_submission(&mut multipart).await {
        Ok(parsed) => parsed,
        Err(AppError::BadRequest(msg)) | Err(AppError::Validation(msg)) => {
            return render_form(&state.templates, FormStatus::error(msg));
        }
        Err(e) => return Err(e),
    };

    if form.validate().is_err() {
        return render_form(&state.templates, FormStatus::warning(REQUIRED_FIELDS_WARNING));
    }

    match state.submission_service.submit(form, screenshot).await {
        Ok(outcome) => render_form(
            &state.templates,
            FormStatus {
                kind: "success",
                message: "Entry submitted successfully!".to_string(),
                screenshot_link: outcome.submission.screenshot_link,
                screenshot_warning: outcome.screenshot_warning,
            },
        ),
        // Surface the failure on the page instead of a bare error response
        Err(e) => render_form(&state.templates, FormStatus::error(e.to_string())),
    }
}

fn render_form(env: &Environment<'static>, status: FormStatus) -> Result<Html<String>, AppError> {
    let template = env
        .get_template("form.jinja")
        .map_err(|e| AppError::Internal(format!("Form template missing: {}", e)))?;

    let html = template
        .render(context! {
            kind => status.kind,
            message => status.message,
            screenshot_link => status.screenshot_link,
            screenshot_warning => status.screenshot_warning,
        })
        .map_err(|e| AppError::Internal(format!("Failed to render form template: {}", e)))?;

    Ok(Html(html))
}
