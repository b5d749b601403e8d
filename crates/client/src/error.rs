/// Failures surfaced by the API client.
///
/// Only transport and decode problems are errors. An application-level
/// failure (a payload with a falsy `success`) is returned to the caller as a
/// payload for inspection, and a non-2xx status with a decodable body is
/// treated the same way: the backend signals failure in-band.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
