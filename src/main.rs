#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use crate::config::AppConfig;
use crate::services::youtube::YouTubeClient;
use rocket::serde::json::{json, Value};
use rocket::{Build, Rocket};

pub struct AppState {
    pub youtube: YouTubeClient,
}

#[get("/")]
fn index() -> Value {
    json!({ "message": "YouTube analytics backend is running" })
}

pub fn build_rocket(app_config: AppConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", app_config.port))
        .merge(("address", "0.0.0.0"));

    let cors = config::create_cors().expect("Failed to create CORS fairing");

    rocket::custom(figment)
        .manage(AppState {
            youtube: YouTubeClient::new(app_config.youtube_api_key),
        })
        .mount("/", routes![index])
        .mount("/api", routes![api::channel::channel_id, api::data::channel_data])
        .attach(cors)
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let app_config = AppConfig::from_env().expect("Failed to load configuration");

    build_rocket(app_config)
}
