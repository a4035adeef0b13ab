#[macro_use]
extern crate rocket;

pub mod catchers;
pub mod config;
pub mod controllers;
pub mod error;
pub mod fairings;
pub mod models;
pub mod repository;
pub mod routes;
pub mod validation;

use config::Config;
use controllers::PostController;
use fairings::db::DBFairing;
use repository::MemoryPostRepository;
use rocket::{Build, Rocket};

/// Builds the server for the given configuration: MySQL when a database url
/// is set, the in-memory store otherwise.
pub fn build(config: &Config) -> Rocket<Build> {
    let rocket = mount(rocket::build());
    match &config.database_url {
        Some(url) => rocket.attach(DBFairing::new(url.clone(), config.auto_migrate)),
        None => rocket.manage(PostController::new(MemoryPostRepository::new())),
    }
}

/// Builds the server around an existing controller.
pub fn build_with(controller: PostController) -> Rocket<Build> {
    mount(rocket::build()).manage(controller)
}

fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/api/posts", routes::post_routes()).register(
        "/",
        catchers![
            catchers::bad_request,
            catchers::not_found,
            catchers::unprocessable_entity,
            catchers::internal_server_error
        ],
    )
}
