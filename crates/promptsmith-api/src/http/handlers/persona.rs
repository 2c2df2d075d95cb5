//! POST /api/generate-persona

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use promptsmith_types::answers::AnswerSet;

use super::parse_lenient;
use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneratePersonaRequest {
    pub answers: AnswerSet,
}

pub async fn generate_persona(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request: GeneratePersonaRequest = parse_lenient(&body);
    let persona = state.persona_service.generate(&request.answers).await?;
    Ok(Json(json!({ "persona": persona })))
}
