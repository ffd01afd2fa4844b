use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    /// The body arrived but does not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Transport-level failures: the request did not produce a usable answer.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. } | Error::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_failures_are_network_errors() {
        assert!(Error::Malformed("no json".into()).is_network());
        assert!(Error::Status {
            status: StatusCode::BAD_GATEWAY,
            url: "http://127.0.0.1:8080/api/show-history".into(),
        }
        .is_network());
        assert!(!Error::Validation("Пожалуйста, введите тикер".into()).is_network());
        assert!(!Error::Config("unsupported locale: de-de".into()).is_network());
    }
}
