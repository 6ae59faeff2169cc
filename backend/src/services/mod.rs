pub mod keyword_service;
pub mod normalizer;
pub mod trend_service;
pub mod youtube_client;
