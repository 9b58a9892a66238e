/// Failure classes for the two-hop spotify flow.
///
/// The callers of the token and playback endpoints used to collapse
/// every non-success into an empty value, which made "bad credentials",
/// "spotify is down", and "nothing playing" indistinguishable. Each
/// class gets its own variant instead; "nothing playing" is not an
/// error at all and is modeled as `Ok(None)` by the fetch side.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing configuration value: {0}")]
    MissingConfig(&'static str),

    #[error("token exchange failed with status {status}")]
    AuthFailed { status: u16 },

    #[error("currently-playing fetch failed with status {status}")]
    FetchFailed { status: u16 },

    #[error("http error: {0}")]
    Http(String),

    #[error("json error: {0}")]
    Json(String),
}
