use crate::error::FetchError;
use crate::models::VideoRecord;
use crate::services::normalizer::normalize_items;
use crate::services::youtube_client::YoutubeApi;
use log::info;

/// Fetches the most-popular chart for `region_code` and normalizes it in chart order.
pub async fn fetch_trending(
    youtube: &dyn YoutubeApi,
    region_code: &str,
) -> Result<Vec<VideoRecord>, FetchError> {
    let response = youtube.most_popular(region_code).await?;
    let records = normalize_items(&response.items);
    info!("Fetched {} trending videos for region {region_code}", records.len());
    Ok(records)
}
