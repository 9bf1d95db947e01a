//! Deadline assessment for the intake and edit forms.

use axum::extract::State;
use axum::Json;
use clientdesk_core::priority::{assess, parse_submission_date, Priority, PriorityAssessment};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub submission_date: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// POST /api/priority/preview
///
/// Reports days remaining, the suggested tier, whether the priority control
/// should be enabled, and the priority that would be stored.
pub async fn preview(
    State(state): State<AppState>,
    Json(input): Json<PreviewRequest>,
) -> AppResult<Json<DataResponse<PriorityAssessment>>> {
    let submission_date = parse_submission_date(&input.submission_date)?;
    let assessment = assess(
        submission_date,
        input.priority.unwrap_or_default(),
        state.today(),
    );
    Ok(Json(DataResponse { data: assessment }))
}
