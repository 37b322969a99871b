use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        ChatRequest, ChatResponse, PhotoAnalysisResponse, ProductRequest, ProductResponse,
        SizeAnalysisResponse, SizeRequest, TrendQuery, TrendResponse,
    },
    services::{fit_analysis, llm::ImageInput, photo_analysis, product_selection, trends},
};

use super::{AppJson, AppState};

/// Multipart field holding the photo
const PHOTO_FIELD: &str = "file";

/// Service banner
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "AURA AI shopping assistant API",
        "status": "running",
        "ai_available": state.ai_available(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Handler for `POST /analyze-size`
pub async fn analyze_size(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<SizeRequest>,
) -> AppResult<Json<SizeAnalysisResponse>> {
    tracing::info!(
        request_id = %request_id,
        brand = %request.brand,
        size = %request.product_size,
        gender = %request.gender,
        "Processing size analysis"
    );

    let response =
        fit_analysis::analyze_size(state.model(), &request, &state.settings.reply_language)
            .await?;

    tracing::info!(
        request_id = %request_id,
        ai_type = ?response.ai_type,
        "Size analysis completed"
    );

    Ok(Json(response))
}

/// Handler for `POST /analyze-photo`
pub async fn analyze_photo(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> AppResult<Json<PhotoAnalysisResponse>> {
    let image = read_photo(&mut multipart, state.settings.max_upload_bytes).await?;

    tracing::info!(
        request_id = %request_id,
        mime_type = %image.mime_type,
        bytes = image.data.len(),
        "Processing photo analysis"
    );

    let response =
        photo_analysis::analyze_photo(state.model(), &image, &state.settings.reply_language)
            .await?;

    tracing::info!(
        request_id = %request_id,
        ai_type = ?response.ai_type,
        gender = %response.detected_gender,
        body_type = %response.detected_body_type,
        "Photo analysis completed"
    );

    Ok(Json(response))
}

/// Pulls the `file` field out of the upload and validates it
async fn read_photo(multipart: &mut Multipart, max_bytes: usize) -> AppResult<ImageInput> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let mime_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file bytes: {}", e)))?
            .to_vec();

        photo_analysis::validate_upload(mime_type.as_deref(), &data, max_bytes)?;

        return Ok(ImageInput {
            mime_type: mime_type.unwrap_or_default(),
            data,
        });
    }

    Err(AppError::InvalidInput("No file uploaded".to_string()))
}

/// Handler for `POST /get-products`
pub async fn get_products(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<ProductRequest>,
) -> Json<ProductResponse> {
    tracing::info!(
        request_id = %request_id,
        brand = %request.brand,
        category = %request.category,
        "Processing product request"
    );

    let response = product_selection::get_products(
        &request,
        state.settings.product_limit,
        &mut rand::thread_rng(),
    );

    if let Some(recorder) = &state.recorder {
        recorder.record_products(&response.products);
    }

    tracing::info!(
        request_id = %request_id,
        success = response.success,
        product_count = response.product_count,
        "Product request completed"
    );

    Json(response)
}

/// Handler for `POST /chat-product-search`
pub async fn chat_product_search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    tracing::info!(
        request_id = %request_id,
        conversation_id = ?request.conversation_id,
        "Processing chat message"
    );

    let response = state.chat.respond(&request).await?;

    if let Some(recorder) = &state.recorder {
        recorder.record_products(&response.products);
    }

    tracing::info!(
        request_id = %request_id,
        conversation_id = %response.conversation_id,
        product_count = response.products.len(),
        "Chat message answered"
    );

    Ok(Json(response))
}

/// Handler for `GET /trends`
pub async fn get_trends(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<TrendResponse>> {
    let week = trends::resolve_week(query.week.as_deref())?;
    let limit = trends::resolve_limit(query.limit);

    let Some(store) = &state.trends else {
        return Ok(Json(TrendResponse {
            enabled: false,
            week,
            trends: Vec::new(),
        }));
    };

    let entries = store.top(&week, limit).await?;

    tracing::info!(
        request_id = %request_id,
        week = %week,
        rows = entries.len(),
        "Trends fetched"
    );

    Ok(Json(TrendResponse {
        enabled: true,
        week,
        trends: entries,
    }))
}
