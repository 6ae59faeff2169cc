use crate::models::ErrorResponse;
use rocket::http::Status;
use thiserror::Error;

/// Failures while talking to the YouTube Data API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("YouTube API key is not set")]
    MissingApiKey,

    #[error("request to {endpoint} failed: {source}")]
    UpstreamRequest {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with status {status}: {body}")]
    UpstreamStatus {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("could not decode {endpoint} response: {source}")]
    UpstreamDecode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// Short marker naming the failure kind, used in strict-mode error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::MissingApiKey => "MissingAPIKey",
            FetchError::UpstreamRequest { .. }
            | FetchError::UpstreamStatus { .. }
            | FetchError::InvalidUrl(_) => "UpstreamRequestFailure",
            FetchError::UpstreamDecode { .. } => "UpstreamDecodeFailure",
        }
    }

    pub fn status(&self) -> Status {
        match self {
            FetchError::MissingApiKey => Status::ServiceUnavailable,
            _ => Status::BadGateway,
        }
    }
}

impl From<FetchError> for ErrorResponse {
    fn from(err: FetchError) -> Self {
        ErrorResponse {
            status: err.status(),
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_maps_to_service_unavailable() {
        let response = ErrorResponse::from(FetchError::MissingApiKey);
        assert_eq!(response.status, Status::ServiceUnavailable);
        assert_eq!(response.error, "MissingAPIKey");
    }

    #[test]
    fn upstream_status_maps_to_bad_gateway() {
        let err = FetchError::UpstreamStatus {
            endpoint: "search",
            status: 403,
            body: "quotaExceeded".to_string(),
        };
        assert_eq!(err.kind(), "UpstreamRequestFailure");
        let response = ErrorResponse::from(err);
        assert_eq!(response.status, Status::BadGateway);
        assert!(response.message.contains("403"));
    }

    #[test]
    fn decode_failure_is_named() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FetchError::UpstreamDecode {
            endpoint: "videos",
            source,
        };
        assert_eq!(err.kind(), "UpstreamDecodeFailure");
        assert_eq!(err.status(), Status::BadGateway);
    }
}
