//! Classification endpoint: which knowledge base would answer a question.

use std::time::Instant;

use axum::Json;
use serde::{Deserialize, Serialize};

use humboldt_core::topic::classify;
use humboldt_types::topic::TopicBucket;

use crate::http::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub topic: TopicBucket,
    pub slug: &'static str,
}

/// POST /api/v1/classify -- keyword classification only, no remote call.
pub async fn classify_question(
    Json(body): Json<ClassifyRequest>,
) -> Json<ApiResponse<ClassifyResponse>> {
    let start = Instant::now();
    let topic = classify(&body.question);
    Json(ApiResponse::success(
        ClassifyResponse {
            topic,
            slug: topic.slug(),
        },
        start,
    ))
}
