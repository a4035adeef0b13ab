use rocket::serde::json::{json, Json, Value};
use rocket::Request;

#[catch(400)]
pub fn bad_request(_: &Request) -> Json<Value> {
    Json(json!({ "message": "Bad request" }))
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<Value> {
    Json(json!({ "message": format!("No route for {} {}", req.method(), req.uri()) }))
}

#[catch(422)]
pub fn unprocessable_entity(_: &Request) -> Json<Value> {
    Json(json!({ "message": "The request was well-formed but could not be processed" }))
}

#[catch(500)]
pub fn internal_server_error(_: &Request) -> Json<Value> {
    Json(json!({ "message": "Internal Server Error" }))
}
