//! Entry point and self-service path allow-list.

/// Unauthenticated entry point of the application.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Path prefixes a not-yet-approved user may still visit: the self-service
/// admission-status pages.
pub const SELF_SERVICE_PREFIXES: &[&str] = &["/app/admissions/my", "/app/admissions/status"];

/// Whether `path` falls under the self-service allow-list (prefix match).
pub fn is_self_service_path(path: &str) -> bool {
    SELF_SERVICE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}
