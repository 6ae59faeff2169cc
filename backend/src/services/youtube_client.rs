use crate::config::Settings;
use crate::error::FetchError;
use crate::models::{SearchListResponse, VideoListResponse};
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Page size for both the trend chart and keyword search.
pub const MAX_RESULTS: u32 = 48;

/// The three YouTube Data API calls the relay needs.
#[rocket::async_trait]
pub trait YoutubeApi: Send + Sync {
    /// `videos.list` with `chart=mostPopular` for one region.
    async fn most_popular(&self, region_code: &str) -> Result<VideoListResponse, FetchError>;

    /// `search.list` restricted to videos.
    async fn search(&self, query: &str) -> Result<SearchListResponse, FetchError>;

    /// `videos.list` for a comma-separated batch of ids.
    async fn video_details(&self, batch_ids: &str) -> Result<VideoListResponse, FetchError>;
}

pub struct YoutubeClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;
        Ok(YoutubeClient {
            client,
            api_key: settings.youtube_api_key.clone(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_key(&self) -> Result<&str, FetchError> {
        match self.api_key.as_deref() {
            Some(key) => Ok(key),
            None => {
                warn!("YouTube API Key is not set");
                Err(FetchError::MissingApiKey)
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
    ) -> Result<T, FetchError> {
        debug!("GET {endpoint} ({} query params)", url.query_pairs().count());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::UpstreamRequest { endpoint, source })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::UpstreamRequest { endpoint, source })?;

        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                endpoint,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body)
            .map_err(|source| FetchError::UpstreamDecode { endpoint, source })
    }
}

#[rocket::async_trait]
impl YoutubeApi for YoutubeClient {
    async fn most_popular(&self, region_code: &str) -> Result<VideoListResponse, FetchError> {
        let url = most_popular_url(&self.base_url, region_code, self.api_key()?)?;
        self.get_json("videos", url).await
    }

    async fn search(&self, query: &str) -> Result<SearchListResponse, FetchError> {
        let url = search_url(&self.base_url, query, self.api_key()?)?;
        self.get_json("search", url).await
    }

    async fn video_details(&self, batch_ids: &str) -> Result<VideoListResponse, FetchError> {
        let url = video_details_url(&self.base_url, batch_ids, self.api_key()?)?;
        self.get_json("videos", url).await
    }
}

// Documentation: https://developers.google.com/youtube/v3/docs/videos/list
pub fn most_popular_url(
    base_url: &str,
    region_code: &str,
    api_key: &str,
) -> Result<Url, url::ParseError> {
    let max_results = MAX_RESULTS.to_string();
    Url::parse_with_params(
        &format!("{base_url}/videos"),
        &[
            ("part", "snippet,statistics"),
            ("chart", "mostPopular"),
            ("maxResults", max_results.as_str()),
            ("regionCode", region_code),
            ("key", api_key),
        ],
    )
}

// Documentation: https://developers.google.com/youtube/v3/docs/search/list
pub fn search_url(
    base_url: &str,
    query: &str,
    api_key: &str,
) -> Result<Url, url::ParseError> {
    let max_results = MAX_RESULTS.to_string();
    Url::parse_with_params(
        &format!("{base_url}/search"),
        &[
            ("part", "snippet"),
            ("maxResults", max_results.as_str()),
            ("q", query),
            ("type", "video"),
            ("key", api_key),
        ],
    )
}

pub fn video_details_url(
    base_url: &str,
    batch_ids: &str,
    api_key: &str,
) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        &format!("{base_url}/videos"),
        &[
            ("part", "snippet,statistics"),
            ("id", batch_ids),
            ("key", api_key),
        ],
    )
}
