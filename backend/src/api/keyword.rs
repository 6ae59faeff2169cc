use crate::api::video_list_response;
use crate::models::{ErrorResponse, KeywordRequest, VideoRecord};
use crate::services::keyword_service;
use crate::AppState;
use log::warn;
use rocket::serde::json::{self, Json};
use rocket::{post, State};

#[post("/key_word_trend/data", data = "<request>")]
pub async fn key_word_trend_data(
    request: Result<Json<KeywordRequest>, json::Error<'_>>,
    state: &State<AppState>,
) -> Result<Json<Vec<VideoRecord>>, ErrorResponse> {
    let request = match request {
        Ok(request) => request.into_inner(),
        Err(e) => {
            warn!("Rejected keyword request: {e}");
            return Err(ErrorResponse::bad_request("Invalid JSON", e.to_string()));
        }
    };

    let result = keyword_service::search_by_keyword(state.youtube.as_ref(), &request.keyword).await;
    video_list_response("Keyword search", result, state.upstream_policy)
}
