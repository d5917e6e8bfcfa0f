use crate::models::VideoRecord;
use crate::services::youtube::{best_thumbnail, count, string_list, text, YouTubeClient};
use crate::utils::{days_since_now, parse_duration_seconds, round_to};
use anyhow::Result;
use log::info;
use serde_json::Value;
use std::time::Duration;

const VIDEO_THUMBNAIL_PREFERENCE: [&str; 4] = ["maxres", "high", "medium", "default"];

/// Upstream per-call ceiling for playlist pages and video batches.
const MAX_BATCH_SIZE: usize = 50;

/// Courtesy pause between upstream calls to stay clear of rate limiting.
const PAGE_DELAY: Duration = Duration::from_millis(100);

/// Fetch every upload of a channel, in uploads-playlist order, with the
/// derived per-video metrics filled in. A channel without an uploads
/// playlist yields an empty collection rather than an error.
pub async fn fetch_all_videos(
    youtube: &YouTubeClient,
    channel_id: &str,
) -> Result<Vec<VideoRecord>> {
    let playlist_id = match uploads_playlist_id(youtube, channel_id).await? {
        Some(id) => id,
        None => {
            info!("Channel {channel_id} has no uploads playlist");
            return Ok(Vec::new());
        }
    };

    let video_ids = fetch_all_video_ids(youtube, &playlist_id).await?;
    info!("Found {} videos in uploads playlist", video_ids.len());

    fetch_video_details(youtube, &video_ids).await
}

/// Resolve the channel's complete video-library playlist id.
async fn uploads_playlist_id(youtube: &YouTubeClient, channel_id: &str) -> Result<Option<String>> {
    let response = youtube.channel_content_details(channel_id).await?;

    Ok(
        response["items"][0]["contentDetails"]["relatedPlaylists"]["uploads"]
            .as_str()
            .map(String::from),
    )
}

/// Walk the playlist page by page, following nextPageToken until absent.
async fn fetch_all_video_ids(youtube: &YouTubeClient, playlist_id: &str) -> Result<Vec<String>> {
    let mut all_video_ids = Vec::new();
    let mut next_page_token: Option<String> = None;

    loop {
        let response = youtube
            .playlist_page(playlist_id, next_page_token.as_deref())
            .await?;

        if let Some(items) = response["items"].as_array() {
            for item in items {
                if let Some(video_id) = item["contentDetails"]["videoId"].as_str() {
                    all_video_ids.push(video_id.to_string());
                }
            }
        }

        if let Some(token) = response["nextPageToken"].as_str() {
            next_page_token = Some(token.to_string());
        } else {
            break;
        }

        tokio::time::sleep(PAGE_DELAY).await;
    }

    Ok(all_video_ids)
}

/// Fetch details in batches of up to 50 ids, appending in batch order.
async fn fetch_video_details(
    youtube: &YouTubeClient,
    video_ids: &[String],
) -> Result<Vec<VideoRecord>> {
    let mut records = Vec::new();

    for chunk in video_ids.chunks(MAX_BATCH_SIZE) {
        let response = youtube.videos(chunk).await?;

        if let Some(items) = response["items"].as_array() {
            for item in items {
                records.push(build_video_record(item));
            }
        }

        tokio::time::sleep(PAGE_DELAY).await;
    }

    Ok(records)
}

fn build_video_record(item: &Value) -> VideoRecord {
    let snippet = &item["snippet"];
    let stats = &item["statistics"];

    let views = count(&stats["viewCount"]);
    let likes = count(&stats["likeCount"]);
    let comments = count(&stats["commentCount"]);

    // Rates use a views floor of 1 so zero-view videos divide cleanly.
    let views_floor = views.max(1) as f64;

    let published_at = text(&snippet["publishedAt"]);
    let days_since_publish = days_since_now(&published_at);
    let duration = text(&item["contentDetails"]["duration"]);

    VideoRecord {
        video_id: text(&item["id"]),
        title: text(&snippet["title"]),
        description: text(&snippet["description"]),
        publish_date: published_at.get(..10).unwrap_or("").to_string(),
        days_since_publish,
        duration_seconds: parse_duration_seconds(&duration),
        duration,
        views,
        likes,
        comments,
        favorites: count(&stats["favoriteCount"]),
        like_rate: round_to(likes as f64 / views_floor * 100.0, 3),
        comment_rate: round_to(comments as f64 / views_floor * 100.0, 4),
        engagement_rate: round_to((likes + comments) as f64 / views_floor * 100.0, 3),
        views_per_day: round_to(views as f64 / days_since_publish.max(1) as f64, 2),
        thumbnail_url: best_thumbnail(&snippet["thumbnails"], &VIDEO_THUMBNAIL_PREFERENCE),
        tags: string_list(&snippet["tags"]),
        category_id: text(&snippet["categoryId"]),
        topic_categories: string_list(&item["topicDetails"]["topicCategories"]),
    }
}

/// Top videos by view count: stable descending sort, so pagination order
/// breaks ties.
pub fn top_videos_by_views(videos: &[VideoRecord], limit: usize) -> Vec<VideoRecord> {
    let mut sorted = videos.to_vec();
    sorted.sort_by(|a, b| b.views.cmp(&a.views));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video_item(id: &str, views: i64, likes: i64, comments: i64) -> Value {
        json!({
            "id": id,
            "snippet": {
                "title": format!("Video {id}"),
                "description": "desc",
                "publishedAt": "2021-06-01T12:00:00Z",
                "categoryId": "28",
                "tags": ["rust", "testing"],
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/default.jpg" },
                    "maxres": { "url": "https://i.ytimg.com/maxres.jpg" }
                }
            },
            "statistics": {
                "viewCount": views.to_string(),
                "likeCount": likes.to_string(),
                "commentCount": comments.to_string(),
                "favoriteCount": "0"
            },
            "contentDetails": { "duration": "PT10M30S" },
            "topicDetails": {
                "topicCategories": ["https://en.wikipedia.org/wiki/Technology"]
            }
        })
    }

    fn record(id: &str, views: i64) -> VideoRecord {
        build_video_record(&video_item(id, views, 0, 0))
    }

    #[test]
    fn derives_video_metrics() {
        let video = build_video_record(&video_item("abc123", 10_000, 250, 50));

        assert_eq!(video.video_id, "abc123");
        assert_eq!(video.publish_date, "2021-06-01");
        assert!(video.days_since_publish > 0);
        assert_eq!(video.duration, "PT10M30S");
        assert_eq!(video.duration_seconds, 630);
        assert_eq!(video.like_rate, 2.5);
        assert_eq!(video.comment_rate, 0.5);
        assert_eq!(video.engagement_rate, 3.0);
        assert_eq!(video.thumbnail_url, "https://i.ytimg.com/maxres.jpg");
        assert_eq!(video.tags, vec!["rust", "testing"]);
        assert_eq!(video.category_id, "28");
        assert_eq!(
            video.topic_categories,
            vec!["https://en.wikipedia.org/wiki/Technology"]
        );
    }

    #[test]
    fn zero_view_video_uses_views_floor() {
        let video = build_video_record(&video_item("abc123", 0, 3, 1));

        assert_eq!(video.views, 0);
        assert_eq!(video.like_rate, 300.0);
        assert_eq!(video.engagement_rate, 400.0);
        assert_eq!(video.views_per_day, 0.0);
    }

    #[test]
    fn missing_statistics_default_to_zero() {
        let video = build_video_record(&json!({
            "id": "bare",
            "snippet": { "title": "Bare" }
        }));

        assert_eq!(video.views, 0);
        assert_eq!(video.likes, 0);
        assert_eq!(video.comments, 0);
        assert_eq!(video.engagement_rate, 0.0);
        assert_eq!(video.duration_seconds, 0);
        assert_eq!(video.publish_date, "");
        assert_eq!(video.days_since_publish, 0);
        assert!(video.tags.is_empty());
        assert!(video.topic_categories.is_empty());
    }

    #[test]
    fn top_videos_sorted_descending_with_stable_ties() {
        let videos = vec![
            record("a", 100),
            record("b", 500),
            record("c", 100),
            record("d", 900),
        ];

        let top = top_videos_by_views(&videos, 10);

        let ids: Vec<&str> = top.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn top_videos_truncates_to_limit() {
        let videos: Vec<VideoRecord> = (0..25).map(|i| record(&i.to_string(), i)).collect();

        let top = top_videos_by_views(&videos, 10);

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].views >= w[1].views));
        assert_eq!(top[0].views, 24);
    }
}
