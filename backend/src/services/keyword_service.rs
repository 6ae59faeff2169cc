use crate::error::FetchError;
use crate::models::{SearchListResponse, VideoRecord};
use crate::services::normalizer::normalize_items;
use crate::services::youtube_client::YoutubeApi;
use log::{debug, info};

/// Joins the video ids of a search response, in response order, into one comma-separated batch.
/// Results without a video id (channels, playlists) are skipped.
pub fn batch_video_ids(search: &SearchListResponse) -> String {
    search
        .items
        .iter()
        .filter_map(|item| match item.id.video_id.as_deref() {
            Some(id) if !id.is_empty() => Some(id),
            _ => {
                debug!("Skipping search result of kind '{}'", item.id.kind);
                None
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Searches for `keyword`, then enriches the hits with one batched details call.
///
/// The result follows the order of the details response, which YouTube does not guarantee
/// to match the search ranking. No details call is made when the search finds nothing.
pub async fn search_by_keyword(
    youtube: &dyn YoutubeApi,
    keyword: &str,
) -> Result<Vec<VideoRecord>, FetchError> {
    let search = youtube.search(keyword).await?;

    let batch_ids = batch_video_ids(&search);
    if batch_ids.is_empty() {
        info!("No search results for keyword '{keyword}'");
        return Ok(Vec::new());
    }
    debug!("Fetching details for {batch_ids}");

    let details = youtube.video_details(&batch_ids).await?;
    let records = normalize_items(&details.items);
    info!("Fetched {} videos for keyword '{keyword}'", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchItem, SearchItemId};
    use crate::services::testing::{search_hit, video_item, FakeYoutube};

    #[test]
    fn batch_keeps_order_and_skips_non_videos() {
        let search = SearchListResponse {
            items: vec![
                search_hit("v2"),
                SearchItem {
                    id: SearchItemId {
                        kind: "youtube#channel".to_string(),
                        video_id: None,
                    },
                },
                search_hit("v1"),
                search_hit(""),
            ],
        };
        assert_eq!(batch_video_ids(&search), "v2,v1");
    }

    #[rocket::async_test]
    async fn enriches_with_one_details_call() {
        let fake = FakeYoutube::default()
            .with_search(vec![search_hit("a"), search_hit("b")])
            .with_details(vec![video_item("b", "Bee", "UC2"), video_item("a", "Ay", "UC1")]);

        let records = search_by_keyword(&fake, "rust").await.unwrap();

        assert_eq!(fake.detail_batches(), ["a,b"]);
        // details order wins over search order
        assert_eq!(records[0].title, "Bee");
        assert_eq!(records[1].title, "Ay");
        assert_eq!(records[0].view_count, "100");
    }

    #[rocket::async_test]
    async fn zero_hits_skip_details_call() {
        let fake = FakeYoutube::default().with_details(vec![video_item("x", "X", "UC")]);

        let records = search_by_keyword(&fake, "nothing matches").await.unwrap();

        assert!(records.is_empty());
        assert!(fake.detail_batches().is_empty());
        assert_eq!(fake.queries(), ["nothing matches"]);
    }

    #[rocket::async_test]
    async fn empty_keyword_is_forwarded() {
        let fake = FakeYoutube::default();
        search_by_keyword(&fake, "").await.unwrap();
        assert_eq!(fake.queries(), [""]);
    }

    #[rocket::async_test]
    async fn search_failure_stops_before_details() {
        let fake = FakeYoutube::default().failing_search();
        assert!(search_by_keyword(&fake, "rust").await.is_err());
        assert!(fake.detail_batches().is_empty());
    }

    #[rocket::async_test]
    async fn details_failure_fabricates_nothing() {
        let fake = FakeYoutube::default()
            .with_search(vec![search_hit("a")])
            .failing_details();
        let err = search_by_keyword(&fake, "rust").await.unwrap_err();
        assert_eq!(err.kind(), "UpstreamDecodeFailure");
    }
}
