//! The set of HTTP status codes the web API is documented to return.

use http::StatusCode;

/// Status codes the web API is known to answer with.
///
/// Anything outside this set is reported as
/// [`Error::UnrecognizedStatus`](crate::Error::UnrecognizedStatus).
pub const RECOGNIZED: [StatusCode; 13] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
    StatusCode::NOT_MODIFIED,
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::NOT_FOUND,
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
];

/// Returns `true` if `status` is in [`RECOGNIZED`].
#[must_use]
pub fn is_recognized(status: u16) -> bool {
    RECOGNIZED.iter().any(|code| code.as_u16() == status)
}

/// Human-readable description of a status code.
///
/// Recognized codes map to their canonical reason phrase; anything else is
/// prefixed with `Unexpected status:`.
#[must_use]
pub fn describe(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason());

    match reason {
        Some(reason) if is_recognized(status) => reason.to_string(),
        Some(reason) => format!("Unexpected status: {reason}"),
        None => format!("Unexpected status: {status}"),
    }
}
