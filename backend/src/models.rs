use log::error;
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// Flat record handed to the frontend, one per video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub image: String,
    pub title: String,
    pub url: String,
    pub channel: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordRequest {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: Status,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        ErrorResponse {
            status: Status::BadRequest,
            error: error.to_string(),
            message: message.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|e| {
            error!("Failed to serialize error response: {e:?}");
            Status::InternalServerError
        })?;
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

// YouTube Data API v3 response shapes.
// Documentation: https://developers.google.com/youtube/v3/docs/videos/list
// Unknown fields are ignored and missing ones default, so partial payloads still decode.

/// Body of `videos.list`, used both for the most-popular chart and for id lookups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoListResponse {
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Snippet,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub channel_id: String,
    pub thumbnails: Thumbnails,
}

/// Thumbnail candidates keyed by quality label. Other labels such as `standard` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
}

/// Engagement counters. YouTube sends these as strings and omits hidden ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

/// Body of `search.list`. Search results carry no statistics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchListResponse {
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchItemId {
    pub kind: String,
    pub video_id: Option<String>,
}
