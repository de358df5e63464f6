//! Route definitions for public submissions.

use axum::routing::post;
use axum::Router;
use teamunited_core::submission::{
    ContactMessage, PartnerApplication, StorySubmission, VolunteerApplication,
};

use crate::handlers::submissions;
use crate::state::AppState;

/// Routes mounted at `/submissions`, one per public form.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/partner", post(submissions::submit::<PartnerApplication>))
        .route("/volunteer", post(submissions::submit::<VolunteerApplication>))
        .route("/story", post(submissions::submit::<StorySubmission>))
        .route("/contact", post(submissions::submit::<ContactMessage>))
}
