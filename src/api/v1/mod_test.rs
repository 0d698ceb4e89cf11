use axum::http::StatusCode;

use super::error_response;
use crate::db::DbError;
use crate::service::TodoError;

#[test]
fn validation_maps_to_bad_request() {
    let (status, body) = error_response(TodoError::Validation {
        message: "List name is required".to_string(),
    });

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "List name is required");
}

#[test]
fn not_found_maps_to_not_found() {
    let (status, body) = error_response(TodoError::NotFound {
        entity_type: "Task".to_string(),
        id: "deadbeef".to_string(),
    });

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.error, "Task not found");
}

#[test]
fn conflict_maps_to_conflict() {
    let (status, body) = error_response(TodoError::Conflict {
        id: "a1b2c3d4".to_string(),
    });

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.error.contains("a1b2c3d4"));
}

#[test]
fn store_failure_maps_to_internal_error() {
    let (status, body) = error_response(TodoError::Store(DbError::Database {
        message: "disk I/O error".to_string(),
    }));

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.error.contains("disk I/O error"));
}
