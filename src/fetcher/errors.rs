use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("document too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("downloaded file is not a valid PDF")]
    InvalidDocument,

    #[error("io error: {0}")]
    Io(String),

    #[error("response body could not be decoded: {0}")]
    Decode(String),

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<FetchError>,
    },

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Only transport failures are retried. A response that arrived, whatever
    /// its status or encoding, will not change within one request.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Http { .. } => false,
            Self::BodyTooLarge(_) => false,
            Self::InvalidDocument => false,
            Self::RedirectLoop => false,
            Self::RetriesExhausted { .. } => false,
            Self::Decode(_) => false,
            Self::Unknown(_) => false,

            Self::ConnectTimeout => true,
            Self::RequestTimeout => true,
            Self::Connect(_) => true,
            Self::Io(_) => true,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_body() {
            Self::Io(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
