//! Topic listing endpoint.

use std::time::Instant;

use axum::Json;
use serde::Serialize;

use humboldt_core::topic::keywords_for;
use humboldt_types::topic::TopicBucket;

use crate::http::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct TopicInfo {
    pub name: TopicBucket,
    pub slug: &'static str,
    pub keywords: &'static [&'static str],
}

/// GET /api/v1/topics -- every topic in classification order.
pub async fn list_topics() -> Json<ApiResponse<Vec<TopicInfo>>> {
    let start = Instant::now();
    let topics = TopicBucket::ALL
        .iter()
        .map(|&bucket| TopicInfo {
            name: bucket,
            slug: bucket.slug(),
            keywords: keywords_for(bucket),
        })
        .collect();
    Json(ApiResponse::success(topics, start).with_link("self", "/api/v1/topics"))
}
