use crate::models::{ChannelSummary, GeoRecord, VideoRecord};
use crate::services::channel_service::{fetch_channel_summary, finalize_engagement};
use crate::services::geo_service::mock_geo_breakdown;
use crate::services::video_service::{fetch_all_videos, top_videos_by_views};
use crate::services::youtube::YouTubeClient;
use anyhow::Result;
use log::info;

const TOP_VIDEOS_LIMIT: usize = 10;

pub struct ChannelReport {
    pub channel: ChannelSummary,
    pub videos: Vec<VideoRecord>,
    pub top_videos: Vec<VideoRecord>,
    pub geo: Vec<GeoRecord>,
}

/// Assemble the four result tables for one channel. Any upstream failure
/// aborts the whole report, there are no partial results.
pub async fn build_report(youtube: &YouTubeClient, channel_id: &str) -> Result<ChannelReport> {
    let mut channel = fetch_channel_summary(youtube, channel_id).await?;

    let videos = fetch_all_videos(youtube, channel_id).await?;
    finalize_engagement(&mut channel, &videos);

    let top_videos = top_videos_by_views(&videos, TOP_VIDEOS_LIMIT);
    let geo = mock_geo_breakdown(channel.total_views);

    info!(
        "Report ready for {}: {} videos, {} top, total views {}",
        channel_id,
        videos.len(),
        top_videos.len(),
        channel.total_views
    );

    Ok(ChannelReport {
        channel,
        videos,
        top_videos,
        geo,
    })
}
