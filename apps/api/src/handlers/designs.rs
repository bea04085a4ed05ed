//! Design handlers: the portfolio list and AI mockup generation.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sartor_core::validation::validate_prompt;
use sartor_core::Design;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::ai::ImageGenError;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDto {
    pub id: String,
    pub prompt: String,
    pub image_url: String,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<Design> for DesignDto {
    fn from(design: Design) -> Self {
        DesignDto {
            id: design.id,
            prompt: design.prompt,
            image_url: design.image_url,
            created_at: design.created_at,
        }
    }
}

/// GET /api/designs
pub async fn list_designs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DesignDto>>> {
    let designs = state.db.designs().list().await?;
    Ok(Json(designs.into_iter().map(DesignDto::from).collect()))
}

/// POST /api/ai/generate
///
/// Generates a mockup image, stores it under the media root and records
/// the design in the portfolio.
pub async fn generate_design(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<(StatusCode, Json<DesignDto>)> {
    validate_prompt(&request.prompt).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let Some(generator) = &state.image_gen else {
        return Err(ApiError::Upstream(
            "Image generation is not configured".to_string(),
        ));
    };

    let bytes = generator.generate(&request.prompt).await.map_err(|e| match e {
        ImageGenError::ModelLoading => ApiError::ModelLoading,
        other => ApiError::Upstream(other.to_string()),
    })?;

    let design_id = Uuid::new_v4().to_string();
    let image_url = state
        .media
        .save_design(&design_id, &bytes)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let design = Design {
        id: design_id,
        prompt: request.prompt,
        image_url,
        created_at: Utc::now(),
    };
    state.db.designs().insert(&design).await?;

    info!(design_id = %design.id, "Design generated");
    Ok((StatusCode::CREATED, Json(design.into())))
}

#[cfg(test)]
mod tests {
    use crate::testutil::{json_request, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_generate_without_token_is_502() {
        // test_app() configures no Hugging Face token.
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/ai/generate",
                &json!({ "prompt": "aso oke wrapper, gold" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_400() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request("POST", "/api/ai/generate", &json!({ "prompt": "" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_designs_empty() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("GET")
                    .uri("/api/designs")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
