//! Error mapping helpers for the Octocrab remote host.

use http::StatusCode;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Renders an octocrab failure as a message naming the operation and the
/// category of failure.
pub(super) fn describe_octocrab_error(operation: &str, error: &octocrab::Error) -> String {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            format!(
                "{operation} failed: authentication rejected ({status} {message})",
                status = source.status_code,
                message = source.message
            )
        } else {
            format!(
                "{operation} failed with status {status}: {message}",
                status = source.status_code,
                message = source.message
            )
        };
    }

    if is_network_error(error) {
        return format!("{operation} failed: network error: {error}");
    }

    format!("{operation} failed: {error}")
}
