use anyhow::Result;
use reqwest::Client;
use serde_json::Value;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Thin client over the YouTube Data API v3. Holds the key injected at
/// startup; every call is issued and awaited sequentially by the callers.
pub struct YouTubeClient {
    http: Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        YouTubeClient {
            http: Client::new(),
            api_key,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http
            .get(url)
            .send()
            .await?
            .json::<Value>()
            .await?;
        Ok(response)
    }

    /// Resolve a free-text channel name to `(title, channel_id)` via the
    /// search endpoint. Returns `None` when nothing matches.
    pub async fn search_channel(&self, channel_name: &str) -> Result<Option<(String, String)>> {
        // Documentation: https://developers.google.com/youtube/v3/docs/search
        let url = format!(
            "{API_BASE}/search?part=snippet&type=channel&q={}&key={}",
            urlencoding::encode(channel_name),
            self.api_key
        );

        let response = self.get_json(&url).await?;

        let first = match response["items"].as_array().and_then(|items| items.first()) {
            Some(item) => item,
            None => return Ok(None),
        };

        let channel_id = text(&first["id"]["channelId"]);
        if channel_id.is_empty() {
            return Ok(None);
        }

        Ok(Some((text(&first["snippet"]["title"]), channel_id)))
    }

    /// Full channel resource: snippet, statistics, contentDetails, branding.
    pub async fn channel(&self, channel_id: &str) -> Result<Value> {
        // Documentation: https://developers.google.com/youtube/v3/docs/channels
        let url = format!(
            "{API_BASE}/channels?part=snippet,statistics,contentDetails,brandingSettings&id={channel_id}&key={}",
            self.api_key
        );
        self.get_json(&url).await
    }

    /// Channel resource restricted to contentDetails, for resolving the
    /// uploads playlist.
    pub async fn channel_content_details(&self, channel_id: &str) -> Result<Value> {
        let url = format!(
            "{API_BASE}/channels?part=contentDetails&id={channel_id}&key={}",
            self.api_key
        );
        self.get_json(&url).await
    }

    /// One page of a playlist, up to 50 items.
    pub async fn playlist_page(&self, playlist_id: &str, page_token: Option<&str>) -> Result<Value> {
        // Documentation: https://developers.google.com/youtube/v3/docs/playlistItems
        let mut url = format!(
            "{API_BASE}/playlistItems?part=contentDetails&maxResults=50&playlistId={playlist_id}&key={}",
            self.api_key
        );

        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={token}"));
        }

        self.get_json(&url).await
    }

    /// Details for up to 50 videos in one call.
    pub async fn videos(&self, video_ids: &[String]) -> Result<Value> {
        // Documentation: https://developers.google.com/youtube/v3/docs/videos
        let url = format!(
            "{API_BASE}/videos?part=snippet,statistics,contentDetails,topicDetails&id={}&key={}",
            video_ids.join(","),
            self.api_key
        );
        self.get_json(&url).await
    }
}

/// String field with empty-string default.
pub fn text(value: &Value) -> String {
    value.as_str().unwrap_or("").to_string()
}

/// Count field with 0 default. The API reports statistics as quoted
/// numbers, so try the string form first.
pub fn count(value: &Value) -> i64 {
    value
        .as_str()
        .and_then(|s| s.parse::<i64>().ok())
        .or_else(|| value.as_i64())
        .unwrap_or(0)
}

pub fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Pick the first available thumbnail URL in preference order.
pub fn best_thumbnail(thumbnails: &Value, preference: &[&str]) -> String {
    for size in preference {
        if let Some(url) = thumbnails[size]["url"].as_str() {
            return url.to_string();
        }
    }
    String::new()
}
