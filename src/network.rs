//! Network URL constants for the ISS tracker SDK.

/// Default REST API base URL (the backend's local development address).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the REST API base URL.
pub const API_URL_ENV: &str = "ISS_API_URL";
