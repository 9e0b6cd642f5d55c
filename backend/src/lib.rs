#[macro_use]
extern crate rocket;

pub mod ballot;
pub mod config;
pub mod db;
pub mod election;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;

use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use rocket_db_pools::Database;
use rocket_dyn_templates::Template;

use config::AppConfig;
use error::ConfigError;
use db::Ishocon2Db;
use routes::{admin, results, vote};

/// Directory served under `/css`.
pub const CSS_DIR: &str = "public/css";

pub fn build_rocket(config: &AppConfig) -> Result<Rocket<Build>, ConfigError> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address.clone()))
        .merge(("port", config.port))
        .merge((
            "databases.ishocon2",
            rocket_db_pools::Config {
                url: config.database_url()?,
                min_connections: None,
                max_connections: config.db_max_connections,
                connect_timeout: 3,
                idle_timeout: None,
                extensions: None,
            },
        ));

    let rocket = rocket::custom(figment)
        .attach(Ishocon2Db::init())
        .attach(Template::fairing())
        .mount(
            "/",
            routes![
                results::index,
                results::candidate,
                results::political_party,
                vote::vote_form,
                vote::cast_vote,
                admin::initialize,
            ],
        )
        .mount("/css", FileServer::from(CSS_DIR))
        .register("/", catchers![routes::not_found, routes::internal_error]);

    Ok(rocket)
}
