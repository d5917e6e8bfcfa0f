use crate::models::{ChannelSummary, VideoRecord};
use crate::services::youtube::{best_thumbnail, count, text, YouTubeClient};
use crate::utils::{days_since_now, round_to};
use anyhow::{anyhow, Result};
use log::info;
use serde_json::Value;

const CHANNEL_THUMBNAIL_PREFERENCE: [&str; 3] = ["high", "medium", "default"];

/// Fetch snippet, statistics and branding for one channel and derive the
/// channel-level metrics. `avg_engagement_rate` is left at 0 here and
/// finalized once the video fetch has completed.
pub async fn fetch_channel_summary(
    youtube: &YouTubeClient,
    channel_id: &str,
) -> Result<ChannelSummary> {
    info!("Fetching channel summary for {channel_id}");

    let response = youtube.channel(channel_id).await?;

    let item = response["items"]
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| anyhow!("Channel not found for id {channel_id}"))?;

    Ok(summarize_channel(channel_id, item))
}

fn summarize_channel(channel_id: &str, item: &Value) -> ChannelSummary {
    let snippet = &item["snippet"];
    let stats = &item["statistics"];

    let subscribers = count(&stats["subscriberCount"]);
    let total_views = count(&stats["viewCount"]);
    let total_videos = count(&stats["videoCount"]);

    let published_at = text(&snippet["publishedAt"]);
    let age_days = if published_at.is_empty() {
        0
    } else {
        days_since_now(&published_at)
    };

    let age_months = (age_days as f64 / 30.0).max(1.0);

    ChannelSummary {
        channel_id: channel_id.to_string(),
        title: text(&snippet["title"]),
        description: text(&snippet["description"]),
        country: text(&snippet["country"]),
        created_at: published_at.get(..10).unwrap_or("").to_string(),
        age_days,
        subscribers,
        total_views,
        total_videos,
        videos_per_month: round_to(total_videos as f64 / age_months, 2),
        subscribers_per_view: round_to(subscribers as f64 / total_views.max(1) as f64, 6),
        avg_views_per_video: round_to(total_views as f64 / total_videos.max(1) as f64, 2),
        avg_engagement_rate: 0.0,
        profile_picture_url: best_thumbnail(&snippet["thumbnails"], &CHANNEL_THUMBNAIL_PREFERENCE),
        banner_url: text(&item["brandingSettings"]["image"]["bannerExternalUrl"]),
    }
}

/// Average engagement across the fetched videos, 0 when there are none.
pub fn finalize_engagement(summary: &mut ChannelSummary, videos: &[VideoRecord]) {
    if videos.is_empty() {
        summary.avg_engagement_rate = 0.0;
        return;
    }

    let mean = videos.iter().map(|v| v.engagement_rate).sum::<f64>() / videos.len() as f64;
    summary.avg_engagement_rate = round_to(mean, 2);
}
