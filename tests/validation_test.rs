//! Integration tests for post payload validation.

use postsimple::models::{ContentType, NewPost};
use postsimple::validation::{validate, Validated};
use serde_json::{json, Value};

fn fields(payload: Value) -> Vec<String> {
    match validate(&payload) {
        Validated::Valid(post) => panic!("expected failure, got {post:?}"),
        Validated::Invalid(errors) => errors.iter().map(|e| e.field.clone()).collect(),
    }
}

fn messages(payload: Value) -> Vec<String> {
    validate(&payload)
        .into_result()
        .unwrap_err()
        .iter()
        .map(|e| e.message.clone())
        .collect()
}

#[test]
fn test_valid_payload_is_normalized() {
    let result = validate(&json!({
        "user_id": "12345",
        "email": "user@example.com",
        "password": "hashed_password",
        "content": { "type": "image", "data": "/path/to/image.jpg", "extra": 1 },
        "unexpected": "dropped"
    }));

    assert!(result.is_valid());
    let post: NewPost = result.into_result().unwrap();
    assert_eq!(post.user_id.as_deref(), Some("12345"));
    assert_eq!(post.email, "user@example.com");
    assert_eq!(post.content.content_type, ContentType::Image);
    assert_eq!(post.content.data, "/path/to/image.jpg");
}

#[test]
fn test_user_id_is_optional() {
    let post = validate(&json!({
        "email": "user@example.com",
        "password": "password123",
        "content": { "type": "text", "data": "hi" }
    }))
    .into_result()
    .unwrap();
    assert_eq!(post.user_id, None);
}

#[test]
fn test_empty_object_reports_all_required_fields() {
    assert_eq!(fields(json!({})), vec!["email", "password", "content"]);
    assert_eq!(
        messages(json!({})),
        vec!["Email is required", "Password is required", "Content is required"]
    );
}

#[test]
fn test_content_fields_are_checked_together() {
    let payload = json!({
        "email": "user@example.com",
        "password": "password123",
        "content": {}
    });
    assert_eq!(
        messages(payload),
        vec!["Content type is required", "Content data is required"]
    );
}

#[test]
fn test_every_rule_violation_is_reported() {
    let payload = json!({
        "user_id": 12345,
        "email": "not-an-email",
        "password": "short",
        "content": { "type": "audio", "data": "" }
    });
    assert_eq!(
        messages(payload),
        vec![
            "User ID must be a string",
            "Invalid email format",
            "Password must be at least 8 characters long",
            "Content type must be one of 'image', 'video', or 'text'",
            "Content data must not be empty",
        ]
    );
}

#[test]
fn test_wrong_types_are_rejected() {
    let payload = json!({
        "email": 42,
        "password": ["password123"],
        "content": "text"
    });
    assert_eq!(
        messages(payload),
        vec![
            "Email must be a string",
            "Password must be a string",
            "Content must be an object",
        ]
    );
}

#[test]
fn test_null_counts_as_missing() {
    let payload = json!({
        "email": null,
        "password": "password123",
        "content": { "type": null, "data": "x" }
    });
    assert_eq!(fields(payload), vec!["email", "content.type"]);
}

#[test]
fn test_password_length_counts_characters() {
    let payload = json!({
        "email": "user@example.com",
        "password": "пароль12",
        "content": { "type": "text", "data": "x" }
    });
    assert!(validate(&payload).is_valid());
}

#[test]
fn test_email_shape() {
    for email in ["a@b.co", "first.last@sub.example.org"] {
        let payload = json!({
            "email": email,
            "password": "password123",
            "content": { "type": "text", "data": "x" }
        });
        assert!(validate(&payload).is_valid(), "{email} should be accepted");
    }
    for email in ["", "user@", "user@example", "us er@example.com", "@example.com"] {
        let payload = json!({
            "email": email,
            "password": "password123",
            "content": { "type": "text", "data": "x" }
        });
        assert_eq!(fields(payload), vec!["email"], "{email:?} should be rejected");
    }
}

#[test]
fn test_non_object_payload_has_single_root_error() {
    for payload in [json!(null), json!([1, 2]), json!("post")] {
        assert_eq!(fields(payload), vec![""]);
    }
}
