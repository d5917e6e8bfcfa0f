use crate::models::{ApiError, ReportResponse};
use crate::services::report_service::build_report;
use crate::AppState;
use log::error;
use rocket::serde::json::Json;
use rocket::{get, State};

/// Full channel report: channel summary, all videos, top videos and the
/// synthetic geography breakdown, fetched fresh on every call.
#[get("/data?<channel_name>&<channel_id>")]
pub async fn channel_data(
    channel_name: Option<String>,
    channel_id: Option<String>,
    state: &State<AppState>,
) -> Result<Json<ReportResponse>, ApiError> {
    let resolved_id = match (channel_id, channel_name) {
        (Some(id), _) => id,
        (None, Some(name)) => match state.youtube.search_channel(&name).await {
            Ok(Some((_, id))) => id,
            Ok(None) => return Err(ApiError::NotFound("Channel not found".to_string())),
            Err(e) => {
                error!("Channel search failed for '{name}': {e:?}");
                return Err(ApiError::Upstream(e));
            }
        },
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Missing channel_id or channel_name parameter".to_string(),
            ))
        }
    };

    match build_report(&state.youtube, &resolved_id).await {
        Ok(report) => Ok(Json(ReportResponse {
            channel_info: vec![report.channel],
            videos: report.videos,
            top_videos: report.top_videos,
            geo_data: report.geo,
        })),
        Err(e) => {
            error!("Failed to build report for {resolved_id}: {e:?}");
            Err(ApiError::Upstream(e))
        }
    }
}
