use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use serde_json::json;
use std::io::Cursor;
use thiserror::Error;

/// Channel-level summary row. Built once per report, finalized after the
/// video fetch (average engagement), then serialized and dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub country: String,
    pub created_at: String,
    pub age_days: i64,
    pub subscribers: i64,
    pub total_views: i64,
    pub total_videos: i64,
    pub videos_per_month: f64,
    pub subscribers_per_view: f64,
    pub avg_views_per_video: f64,
    pub avg_engagement_rate: f64,
    pub profile_picture_url: String,
    pub banner_url: String,
}

/// One row per uploaded video, in uploads-playlist order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub publish_date: String,
    pub days_since_publish: i64,
    pub duration: String,
    pub duration_seconds: i64,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub favorites: i64,
    pub like_rate: f64,
    pub comment_rate: f64,
    pub engagement_rate: f64,
    pub views_per_day: f64,
    pub thumbnail_url: String,
    pub tags: Vec<String>,
    pub category_id: String,
    pub topic_categories: Vec<String>,
}

/// Synthetic country breakdown row. Display filler only, no real data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoRecord {
    pub country: String,
    pub views: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelIdResponse {
    pub channel_name: String,
    pub channel_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub channel_info: Vec<ChannelSummary>,
    pub videos: Vec<VideoRecord>,
    pub top_videos: Vec<VideoRecord>,
    pub geo_data: Vec<GeoRecord>,
}

/// Error surface of the two API routes. The four result tables are returned
/// together or not at all, so any pipeline failure collapses into `Upstream`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to fetch data")]
    Upstream(anyhow::Error),
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (Status::BadRequest, json!({ "error": message })),
            ApiError::NotFound(message) => (Status::NotFound, json!({ "error": message })),
            ApiError::Upstream(source) => (
                Status::InternalServerError,
                json!({ "error": "Failed to fetch data", "details": source.to_string() }),
            ),
        };

        let json = body.to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
