#[macro_use]
extern crate rocket;

mod api;
mod config;
mod error;
mod models;
mod services;

use crate::config::{create_cors, init_logger, load_environment, Settings, UpstreamPolicy};
use crate::services::youtube_client::{YoutubeApi, YoutubeClient};
use log::info;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct AppState {
    pub youtube: Arc<dyn YoutubeApi>,
    pub region_code: String,
    pub upstream_policy: UpstreamPolicy,
}

pub fn build_rocket(
    settings: &Settings,
    youtube: Arc<dyn YoutubeApi>,
) -> anyhow::Result<Rocket<Build>> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", settings.port));

    let state = AppState {
        youtube,
        region_code: settings.region_code.clone(),
        upstream_policy: settings.upstream_policy,
    };

    Ok(rocket::custom(figment)
        .attach(create_cors(settings)?)
        .manage(state)
        .mount("/", routes![api::index])
        .mount(
            "/youtube",
            routes![api::main_trend_data, api::key_word_trend_data],
        ))
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    load_environment();
    init_logger();

    let settings = Settings::from_env();
    info!(
        "Serving region {} to {} on port {} ({:?} upstream errors)",
        settings.region_code, settings.frontend_origin, settings.port, settings.upstream_policy
    );

    let youtube = YoutubeClient::new(&settings)?;
    build_rocket(&settings, Arc::new(youtube))?
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed to launch: {e}"))?;

    Ok(())
}
