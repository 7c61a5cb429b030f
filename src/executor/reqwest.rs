use http::header::{HeaderMap, HeaderName, HeaderValue, CONNECTION, HOST};
use http::Method;
use log::debug;
use reqwest::blocking::Client;
use url::Url;

use crate::executor::RequestExecutor;
use crate::{Error, RequestSpec, Response, Result};

/// [`RequestExecutor`] backed by a blocking reqwest client.
///
/// The client keeps no idle connections and every request carries
/// `Connection: close`, so each call runs over a fresh connection.
pub struct ReqwestExecutor {
    client: Client,
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::create()
    }
}

impl ReqwestExecutor {
    pub fn create() -> ReqwestExecutor {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap();

        ReqwestExecutor { client }
    }

    fn send(&self, method: Method, spec: &RequestSpec) -> Result<Response> {
        let url = Url::parse(&spec.endpoint).map_err(|source| Error::InvalidEndpoint {
            endpoint: spec.endpoint.clone(),
            source,
        })?;
        let headers = build_headers(&spec.headers)?;
        let timeout = spec.effective_timeout();

        debug!("{} {} (timeout {:?})", method, url, timeout);

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .timeout(timeout)
            .body(spec.body.clone())
            .send()
            .map_err(|source| {
                if source.is_timeout() {
                    Error::Timeout {
                        seconds: timeout.as_secs(),
                        source,
                    }
                } else {
                    Error::Transport(source)
                }
            })?;

        Ok(response.into())
    }
}

impl RequestExecutor for ReqwestExecutor {
    fn get(&self, spec: &RequestSpec) -> Result<Response> {
        self.send(Method::GET, spec)
    }

    fn post(&self, spec: &RequestSpec) -> Result<Response> {
        self.send(Method::POST, spec)
    }

    fn put(&self, spec: &RequestSpec) -> Result<Response> {
        self.send(Method::PUT, spec)
    }

    fn delete(&self, spec: &RequestSpec) -> Result<Response> {
        self.send(Method::DELETE, spec)
    }
}

// A key of exactly "Host" sets the virtual host rather than a generic
// header; everything else overwrites the previous value for the same key.
pub(super) fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    map.insert(CONNECTION, HeaderValue::from_static("close"));
    for (name, value) in headers {
        let value = HeaderValue::from_str(value).map_err(|source| Error::InvalidHeader {
            name: name.clone(),
            source: source.into(),
        })?;
        if name == "Host" {
            map.insert(HOST, value);
        } else {
            let name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|source| Error::InvalidHeader {
                    name: name.clone(),
                    source: source.into(),
                })?;
            map.insert(name, value);
        }
    }
    Ok(map)
}

impl From<reqwest::blocking::Response> for Response {
    fn from(response: reqwest::blocking::Response) -> Self {
        // Status and headers are captured up front; the reqwest response
        // itself becomes the unconsumed body reader.
        Response::new(response.status(), response.headers().clone(), response)
    }
}
