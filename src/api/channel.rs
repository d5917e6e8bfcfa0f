use crate::models::{ApiError, ChannelIdResponse};
use crate::AppState;
use log::error;
use rocket::serde::json::Json;
use rocket::{get, State};

/// Resolve a free-text channel name to its channel id.
#[get("/channel_id?<channel_name>")]
pub async fn channel_id(
    channel_name: Option<String>,
    state: &State<AppState>,
) -> Result<Json<ChannelIdResponse>, ApiError> {
    let name = channel_name
        .ok_or_else(|| ApiError::BadRequest("Missing channel_name parameter".to_string()))?;

    match state.youtube.search_channel(&name).await {
        Ok(Some((channel_name, channel_id))) => Ok(Json(ChannelIdResponse {
            channel_name,
            channel_id,
        })),
        Ok(None) => Err(ApiError::NotFound("Channel not found".to_string())),
        Err(e) => {
            error!("Channel search failed for '{name}': {e:?}");
            Err(ApiError::Upstream(e))
        }
    }
}
