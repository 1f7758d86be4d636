use super::*;

fn status(status: u16, body: &str) -> ApiError {
    ApiError::Status { status, body: body.to_owned() }
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn status_display_prefers_server_message() {
    let err = status(404, r#"{"error":"Game not found"}"#);
    assert_eq!(err.to_string(), "server returned 404: Game not found");
}

#[test]
fn status_display_falls_back_to_raw_body() {
    assert_eq!(status(502, "Bad Gateway").to_string(), "server returned 502: Bad Gateway");
    assert_eq!(status(500, "").to_string(), "server returned 500: ");
}

#[test]
fn status_display_keeps_json_without_error_field() {
    let err = status(400, r#"{"detail":"nope"}"#);
    assert_eq!(err.to_string(), r#"server returned 400: {"detail":"nope"}"#);
    assert_eq!(err.server_message(), None);
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn unauthorized_covers_401_and_403_only() {
    assert!(status(401, "").is_unauthorized());
    assert!(status(403, "").is_unauthorized());
    assert!(!status(404, "").is_unauthorized());
    assert!(!ApiError::Decode(serde_json::from_str::<u8>("x").unwrap_err()).is_unauthorized());
}
