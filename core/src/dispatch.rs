//! Materialization and dispatch of a `RequestSpec`.
//!
//! # Design
//! `materialize` resolves a `RequestSpec` into an `http::Request` in a fixed order:
//! query split, request target, user agent, inferred content type, explicit headers, then
//! the multipart body swap. Later steps overwrite earlier ones, so explicit
//! headers always beat inferred ones. `run` adds the handler call and the
//! observer call; everything happens on the caller's thread before it returns.

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue};
use http::Request;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::info;

use crate::consts::{APPLICATION_FORM, APPLICATION_JSON, MULTIPART_FORM_DATA, USER_AGENT_VALUE};
use crate::error::DispatchError;
use crate::handler::Handler;
use crate::http::MaterializedRequest;
use crate::recorder::ResponseRecorder;
use crate::request::RequestSpec;

/// Query bytes that `http::Uri` refuses. `%` is absent, so escapes the caller
/// already wrote pass through unchanged.
const QUERY_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Split `path` at `?` into the path and the raw query.
///
/// Only the first two `?`-separated segments are kept: `/a?b?c` yields
/// `("/a", Some("b"))`. An empty query (`/a?`) counts as no query.
pub fn split_query(path: &str) -> (&str, Option<&str>) {
    let mut segments = path.split('?');
    let path = segments.next().unwrap_or_default();
    let query = segments.next().filter(|q| !q.is_empty());
    (path, query)
}

/// Origin-form request target for an already split path and query.
///
/// A path without a leading `/` is made absolute (`hello` becomes `/hello`),
/// so it can never be read as an authority. Query bytes outside the URI
/// character set are percent-encoded; the path is used as written.
pub fn request_target(path: &str, query: Option<&str>) -> String {
    let mut target = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        target.push('/');
    }
    target.push_str(path);
    if let Some(query) = query {
        target.push('?');
        target.extend(utf8_percent_encode(query, QUERY_ENCODE));
    }
    target
}

impl RequestSpec {
    /// Build the request the handler will receive. `self` is not modified.
    pub fn materialize(&self) -> Result<MaterializedRequest, DispatchError> {
        let (path, query) = split_query(&self.path);
        let mut request = Request::builder()
            .method(http::Method::from(self.method))
            .uri(request_target(path, query))
            .body(Bytes::from(self.body.clone()))?;

        let headers = request.headers_mut();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if self.method.infers_content_type() {
            let inferred = if self.body.starts_with('{') {
                APPLICATION_JSON
            } else {
                APPLICATION_FORM
            };
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(inferred));
        }

        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| DispatchError::HeaderName { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| DispatchError::HeaderValue { name: name.clone() })?;
            headers.insert(header_name, header_value);
        }

        let is_multipart = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with(MULTIPART_FORM_DATA));
        if let Some(multipart) = self.multipart_body.as_ref().filter(|_| is_multipart) {
            *request.body_mut() = multipart.clone();
        }

        if self.debug {
            info!("request method: {}", self.method);
            info!("request path: {path}");
            info!("request body: {}", self.body);
            info!("request headers: {:?}", self.headers);
            info!("request header: {:?}", request.headers());
        }

        Ok(request)
    }

    /// Materialize the request, serve it with `handler`, then hand the
    /// recorded response and the request to `observer`.
    ///
    /// Handler panics are not caught. If materialization fails the handler
    /// and the observer are never called.
    pub fn run<H, F>(self, handler: &H, observer: F) -> Result<(), DispatchError>
    where
        H: Handler + ?Sized,
        F: FnOnce(&ResponseRecorder, &MaterializedRequest),
    {
        let request = self.materialize()?;
        let mut recorder = ResponseRecorder::new();
        handler.serve(&mut recorder, &request);
        observer(&recorder, &request);
        Ok(())
    }
}
