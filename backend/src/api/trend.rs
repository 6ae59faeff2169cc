use crate::api::video_list_response;
use crate::models::{ErrorResponse, VideoRecord};
use crate::services::trend_service;
use crate::AppState;
use rocket::serde::json::Json;
use rocket::{get, State};

#[get("/main_trend/data")]
pub async fn main_trend_data(
    state: &State<AppState>,
) -> Result<Json<Vec<VideoRecord>>, ErrorResponse> {
    let result = trend_service::fetch_trending(state.youtube.as_ref(), &state.region_code).await;
    video_list_response("Trend fetch", result, state.upstream_policy)
}
