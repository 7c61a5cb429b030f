//! # requester
//!
//! A minimal blocking HTTP request executor behind a trait. Code that issues
//! HTTP requests depends on [`RequestExecutor`] instead of a concrete client,
//! which makes it trivial to substitute a test double in unit tests.
//!
//! Each call is described by a [`RequestSpec`] (endpoint, headers, body,
//! timeout) and returns the raw [`Response`] with its body left unread:
//!
//! ```no_run
//! use requester::{RequestExecutor, RequestSpec, ReqwestExecutor};
//!
//! # fn main() -> requester::Result<()> {
//! let executor = ReqwestExecutor::default();
//! let spec = RequestSpec::new("http://httpbin.org/anything")
//!     .header("Content-Type", "application/json")
//!     .header("Host", "proxied.example.com");
//!
//! let response = executor.get(&spec)?;
//! println!("{} {}", response.status(), response.text()?);
//! # Ok(())
//! # }
//! ```
//!
//! A `"Host"` header entry overrides the request's virtual host while the
//! connection still targets the literal endpoint, which is handy when testing
//! against reverse proxies. Every exchange carries `Connection: close`, so
//! correctness never depends on keep-alive and the executor behaves well
//! against short-lived mock servers.
//!
//! There is deliberately no retry, pooling, or streaming layer here. Errors
//! are surfaced verbatim and the caller owns any retry policy.

use std::fmt;
use std::io::Read;
use std::time::Duration;

use http::{HeaderMap, StatusCode};

pub mod executor;


pub use crate::executor::reqwest::ReqwestExecutor;
pub use crate::executor::RequestExecutor;

pub type Result<T> = std::result::Result<T, Error>;

/// Timeout applied when a spec carries no positive timeout of its own.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint could not be parsed as a URL. Returned before any network
    /// I/O takes place.
    #[error("invalid endpoint {endpoint:?}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value was rejected by the transport layer. Returned
    /// before any network I/O takes place.
    #[error("invalid header {name:?}")]
    InvalidHeader {
        name: String,
        #[source]
        source: http::Error,
    },

    /// The round trip exceeded the effective timeout.
    #[error("request timed out after {seconds}s")]
    Timeout {
        seconds: u64,
        #[source]
        source: reqwest::Error,
    },

    /// DNS, connection, TLS, or protocol failure during execution.
    #[error("transport failure")]
    Transport(#[source] reqwest::Error),

    /// Reading the response body failed.
    #[error("failed to read response body")]
    Body(#[source] std::io::Error),
}

impl Error {
    /// Local validation failure: no request was sent.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Error::InvalidEndpoint { .. } | Error::InvalidHeader { .. }
        )
    }

    /// Network, protocol, or timeout failure during execution.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Timeout { .. } | Error::Transport(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

/// Caller-supplied description of one HTTP call. Constructed per call,
/// consumed once, discarded; the executor never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSpec {
    /// Target URL. Validity is only checked when the request is built.
    pub endpoint: String,
    /// `None` and `Some(0)` both mean "apply the 30 second default".
    pub timeout_seconds: Option<u64>,
    /// Ordered header entries. When applied, later entries for the same key
    /// overwrite earlier ones, and a key of exactly `"Host"` sets the
    /// request's virtual host instead of a generic header.
    pub headers: Vec<(String, String)>,
    /// Raw request payload; may be empty.
    pub body: Vec<u8>,
}

impl RequestSpec {
    pub fn new(endpoint: impl Into<String>) -> RequestSpec {
        RequestSpec {
            endpoint: endpoint.into(),
            ..RequestSpec::default()
        }
    }

    /// Appends a header entry, converting the value to its canonical string
    /// form.
    pub fn header(mut self, name: impl Into<String>, value: impl ToString) -> RequestSpec {
        self.headers.push((name.into(), value.to_string()));
        self
    }

    /// The timeout actually applied to the call: the supplied value when
    /// positive, otherwise [`DEFAULT_TIMEOUT_SECONDS`].
    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(match self.timeout_seconds {
            Some(seconds) if seconds > 0 => seconds,
            _ => DEFAULT_TIMEOUT_SECONDS,
        })
    }
}

/// Raw response to one call: status, headers, and the body as an unconsumed
/// reader. Reading and releasing the body is the caller's responsibility;
/// [`Response::text`] and [`Response::bytes`] drain it in one step.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Box<dyn Read + Send>,
}

impl Response {
    /// Builds a response from parts. Test doubles use this to fabricate
    /// canned responses, e.g. with a `Cursor` body.
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: impl Read + Send + 'static,
    ) -> Response {
        Response {
            status,
            headers,
            body: Box::new(body),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body_mut(&mut self) -> &mut (dyn Read + Send) {
        &mut *self.body
    }

    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }

    /// Drains the body into a byte vector.
    pub fn bytes(self) -> Result<Vec<u8>> {
        let mut body = self.body;
        let mut buf = Vec::new();
        body.read_to_end(&mut buf).map_err(Error::Body)?;
        Ok(buf)
    }

    /// Drains the body into a string. A non-UTF-8 body is a read failure.
    pub fn text(self) -> Result<String> {
        let mut body = self.body;
        let mut buf = String::new();
        body.read_to_string(&mut buf).map_err(Error::Body)?;
        Ok(buf)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
