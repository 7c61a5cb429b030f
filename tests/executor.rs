use std::io::Cursor;

use http::{HeaderMap, StatusCode};
use httpmock::Method::{DELETE, GET, POST, PUT};
use httpmock::MockServer;

use requester::{RequestExecutor, RequestSpec, ReqwestExecutor, Response, Result};

const ACCEPTED_BODY: &str = r#"{"status":"accepted"}"#;

#[test]
fn every_verb_reaches_a_live_server() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/resource");
        then.status(202).body(ACCEPTED_BODY);
    });
    server.mock(|when, then| {
        when.method(POST).path("/resource");
        then.status(202).body(ACCEPTED_BODY);
    });
    server.mock(|when, then| {
        when.method(PUT).path("/resource");
        then.status(202).body(ACCEPTED_BODY);
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/resource");
        then.status(202).body(ACCEPTED_BODY);
    });

    let executor = ReqwestExecutor::default();
    let spec = RequestSpec {
        timeout_seconds: Some(60),
        body: br#"{"name":"requester"}"#.to_vec(),
        ..RequestSpec::new(server.url("/resource"))
    }
    .header("Content-Type", "application/json")
    .header("Host", "test.test.com");

    for response in [
        executor.get(&spec).unwrap(),
        executor.post(&spec).unwrap(),
        executor.put(&spec).unwrap(),
        executor.delete(&spec).unwrap(),
    ] {
        assert_eq!(202, response.status().as_u16());
        assert_eq!(ACCEPTED_BODY, response.text().unwrap());
    }
}

#[test]
fn corrupted_endpoint_never_reaches_the_network() {
    let executor = ReqwestExecutor::default();
    let spec = RequestSpec::new("```");

    assert!(executor.get(&spec).unwrap_err().is_construction());
    assert!(executor.post(&spec).unwrap_err().is_construction());
    assert!(executor.put(&spec).unwrap_err().is_construction());
    assert!(executor.delete(&spec).unwrap_err().is_construction());
}

/// A canned double standing in for the real executor, the way a consuming
/// codebase would stub HTTP calls out of its unit tests.
struct CannedExecutor {
    status: StatusCode,
    body: &'static str,
}

impl CannedExecutor {
    fn respond(&self) -> Result<Response> {
        Ok(Response::new(
            self.status,
            HeaderMap::new(),
            Cursor::new(self.body.as_bytes().to_vec()),
        ))
    }
}

impl RequestExecutor for CannedExecutor {
    fn get(&self, _spec: &RequestSpec) -> Result<Response> {
        self.respond()
    }

    fn post(&self, _spec: &RequestSpec) -> Result<Response> {
        self.respond()
    }

    fn put(&self, _spec: &RequestSpec) -> Result<Response> {
        self.respond()
    }

    fn delete(&self, _spec: &RequestSpec) -> Result<Response> {
        self.respond()
    }
}

// Stand-in for application code that only knows the trait.
fn submission_accepted(executor: &dyn RequestExecutor, spec: &RequestSpec) -> Result<bool> {
    let response = executor.post(spec)?;
    Ok(response.status() == StatusCode::ACCEPTED)
}

#[test]
fn a_trait_double_substitutes_for_the_real_executor() {
    let double = CannedExecutor {
        status: StatusCode::ACCEPTED,
        body: ACCEPTED_BODY,
    };
    let spec = RequestSpec::new("http://irrelevant.example.com");

    assert!(submission_accepted(&double, &spec).unwrap());

    let rejected = CannedExecutor {
        status: StatusCode::BAD_REQUEST,
        body: r#"{"status":"rejected"}"#,
    };
    assert!(!submission_accepted(&rejected, &spec).unwrap());
}
