//! POST /api/generate-structured-prompt

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_lenient;
use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateStructuredPromptRequest {
    pub persona: String,
    pub user_prompt: String,
}

pub async fn generate_structured_prompt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request: GenerateStructuredPromptRequest = parse_lenient(&body);
    let prompt = state
        .prompt_service
        .generate(&request.persona, &request.user_prompt)
        .await?;
    Ok(Json(json!({ "prompt": prompt })))
}
