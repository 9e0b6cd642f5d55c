// Routes module - organizes all HTTP route handlers

pub mod admin;
pub mod results;
pub mod vote;

use rocket::http::Status;

#[catch(404)]
pub fn not_found() -> (Status, &'static str) {
    (Status::NotFound, "Not Found")
}

#[catch(500)]
pub fn internal_error() -> (Status, &'static str) {
    (Status::InternalServerError, "Internal Server Error")
}
