use crate::controllers::PostController;
use crate::error::PostError;
use crate::models::{Pagination, Post};
use crate::validation::{FieldError, ValidationErrors};
use rocket::http::Status;
use rocket::serde::json::{self, json, Json, Value};
use rocket::State;
use tracing::warn;

type JsonResponse = Result<(Status, Json<Value>), PostError>;
type JsonPayload<'r> = Result<Json<Value>, json::Error<'r>>;

/// A body that does not parse is reported like any other validation failure.
fn payload_value(payload: JsonPayload<'_>) -> Result<Value, PostError> {
    payload.map(Json::into_inner).map_err(|e| {
        warn!(error = %e, "unreadable JSON payload");
        PostError::Validation(ValidationErrors::single(FieldError::new(
            "",
            format!("Malformed JSON payload: {e}"),
        )))
    })
}

fn post_body(message: &str, post: &Post) -> Json<Value> {
    Json(json!({ "message": message, "post": post }))
}

#[post("/", data = "<payload>")]
pub async fn create_post<'r>(
    controller: &State<PostController>,
    payload: JsonPayload<'r>,
) -> JsonResponse {
    let payload = payload_value(payload)?;
    let post = controller.create(&payload).await?;
    Ok((Status::Created, post_body("Post created successfully", &post)))
}

#[get("/?<page>&<limit>")]
pub async fn get_posts(
    controller: &State<PostController>,
    page: Option<&str>,
    limit: Option<&str>,
) -> JsonResponse {
    let listing = controller
        .list(Pagination::from_query(page, limit))
        .await?;

    Ok((
        Status::Ok,
        Json(json!({
            "message": "Posts retrieved successfully",
            "count": listing.posts.len(),
            "total": listing.total,
            "page": listing.pagination.page,
            "limit": listing.pagination.limit,
            "posts": listing.posts,
        })),
    ))
}

#[get("/<id>")]
pub async fn get_post(controller: &State<PostController>, id: &str) -> JsonResponse {
    let post = controller.get(id).await?;
    Ok((Status::Ok, post_body("Post retrieved successfully", &post)))
}

#[put("/<id>", data = "<payload>")]
pub async fn update_post<'r>(
    controller: &State<PostController>,
    id: &str,
    payload: JsonPayload<'r>,
) -> JsonResponse {
    let payload = payload_value(payload)?;
    let post = controller.update(id, &payload).await?;
    Ok((Status::Ok, post_body("Post updated successfully", &post)))
}

#[delete("/<id>")]
pub async fn delete_post(controller: &State<PostController>, id: &str) -> JsonResponse {
    let post = controller.delete(id).await?;
    Ok((Status::Ok, post_body("Post deleted (soft) successfully", &post)))
}
