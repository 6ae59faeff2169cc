mod health;
pub mod keyword;
pub mod trend;

pub use health::*;
pub use keyword::*;
pub use trend::*;

use crate::config::UpstreamPolicy;
use crate::error::FetchError;
use crate::models::{ErrorResponse, VideoRecord};
use log::error;
use rocket::serde::json::Json;

/// Turns a flow result into a response according to the upstream failure policy.
pub(crate) fn video_list_response(
    flow: &str,
    result: Result<Vec<VideoRecord>, FetchError>,
    policy: UpstreamPolicy,
) -> Result<Json<Vec<VideoRecord>>, ErrorResponse> {
    match result {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            error!("{flow} failed: {e}");
            match policy {
                UpstreamPolicy::Lenient => Ok(Json(Vec::new())),
                UpstreamPolicy::Strict => Err(e.into()),
            }
        }
    }
}
