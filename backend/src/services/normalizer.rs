use crate::models::{Snippet, Statistics, Thumbnails, VideoItem, VideoRecord};
use url::form_urlencoded;

pub const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";
pub const CHANNEL_BASE_URL: &str = "https://www.youtube.com/channel";

/// Picks the best thumbnail: maxres, then high, medium, default. Empty URLs are skipped.
pub fn select_thumbnail(thumbnails: &Thumbnails) -> String {
    [
        &thumbnails.maxres,
        &thumbnails.high,
        &thumbnails.medium,
        &thumbnails.default,
    ]
    .into_iter()
    .flatten()
    .find(|thumb| !thumb.url.is_empty())
    .map(|thumb| thumb.url.clone())
    .unwrap_or_default()
}

pub fn watch_url(video_id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("v", video_id)
        .finish();
    format!("{WATCH_BASE_URL}?{query}")
}

/// Every id, including `.` and `..`, lands as one escaped segment after the base.
pub fn channel_url(channel_id: &str) -> String {
    format!("{CHANNEL_BASE_URL}/{}", urlencoding::encode(channel_id))
}

pub fn normalize(video_id: &str, snippet: &Snippet, statistics: &Statistics) -> VideoRecord {
    VideoRecord {
        image: select_thumbnail(&snippet.thumbnails),
        title: snippet.title.clone(),
        url: watch_url(video_id),
        channel: channel_url(&snippet.channel_id),
        view_count: statistics.view_count.clone().unwrap_or_default(),
        like_count: statistics.like_count.clone().unwrap_or_default(),
        comment_count: statistics.comment_count.clone().unwrap_or_default(),
    }
}

/// Normalizes every item, keeping upstream order.
pub fn normalize_items(items: &[VideoItem]) -> Vec<VideoRecord> {
    items
        .iter()
        .map(|item| normalize(&item.id, &item.snippet, &item.statistics))
        .collect()
}
