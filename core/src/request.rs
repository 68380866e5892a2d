//! `RequestSpec`: the fluent description of one simulated request.
//!
//! # Design
//! Every configuration call takes the builder by value and hands it back, so
//! chains read top to bottom and `run` consumes the builder exactly once. Calls
//! never fail. Repeated calls follow "last call wins", and empty inputs to
//! `set_header` / `set_body` leave the previous value in place.

use bytes::Bytes;
use serde::Serialize;
use url::form_urlencoded;

use crate::consts::CONTENT_TYPE;
use crate::http::{Headers, HttpMethod};
use crate::multipart::MultipartForm;

/// User-configured description of a single request to simulate.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RequestSpec {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) body: String,
    pub(crate) headers: Headers,
    pub(crate) multipart_body: Option<Bytes>,
    pub(crate) debug: bool,
}

impl RequestSpec {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, method: HttpMethod, path: &str) -> Self {
        self.method = method;
        self.path = path.to_string();
        self
    }

    pub fn get(self, path: &str) -> Self {
        self.route(HttpMethod::Get, path)
    }

    pub fn post(self, path: &str) -> Self {
        self.route(HttpMethod::Post, path)
    }

    pub fn put(self, path: &str) -> Self {
        self.route(HttpMethod::Put, path)
    }

    pub fn delete(self, path: &str) -> Self {
        self.route(HttpMethod::Delete, path)
    }

    pub fn patch(self, path: &str) -> Self {
        self.route(HttpMethod::Patch, path)
    }

    pub fn head(self, path: &str) -> Self {
        self.route(HttpMethod::Head, path)
    }

    pub fn options(self, path: &str) -> Self {
        self.route(HttpMethod::Options, path)
    }

    /// Replace the configured headers wholesale. An empty input is ignored.
    pub fn set_header<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let headers: Headers = collect_pairs(headers);
        if !headers.is_empty() {
            self.headers = headers;
        }
        self
    }

    /// Store `value` as a compact JSON body.
    ///
    /// If serialization fails the body is left unchanged and no error is
    /// reported. Callers cannot tell that case apart from "no body set".
    pub fn set_json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        if let Ok(body) = serde_json::to_string(value) {
            self.body = body;
        }
        self
    }

    /// Store the pairs as an `application/x-www-form-urlencoded` body.
    pub fn set_form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: Headers = collect_pairs(fields);
        let mut encoder = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &fields {
            encoder.append_pair(key, value);
        }
        self.body = encoder.finish();
        self
    }

    /// Encode the pairs as `multipart/form-data`.
    ///
    /// The encoded bytes are kept apart from the string body, and the
    /// boundary-specific `Content-Type` is written into the configured
    /// headers. A later `set_header` call replaces that entry too.
    pub fn set_multipart_form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: Headers = collect_pairs(fields);
        let mut form = MultipartForm::new();
        for (key, value) in &fields {
            form.write_field(key, value);
        }
        self.headers
            .retain(|name, _| !name.eq_ignore_ascii_case(CONTENT_TYPE));
        self.headers.insert(CONTENT_TYPE.to_string(), form.content_type());
        self.multipart_body = Some(form.finish());
        self
    }

    /// Set a raw body. An empty string is ignored.
    pub fn set_body(mut self, body: &str) -> Self {
        if !body.is_empty() {
            self.body = body.to_string();
        }
        self
    }

    /// Log the materialized request when it is dispatched.
    pub fn set_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path as configured, including any `?query` suffix.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn multipart_body(&self) -> Option<&Bytes> {
        self.multipart_body.as_ref()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }
}

fn collect_pairs<I, K, V>(pairs: I) -> Headers
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn new_spec_is_empty() {
        let spec = RequestSpec::new();
        assert_eq!(spec.method(), HttpMethod::Get);
        assert_eq!(spec.path(), "");
        assert_eq!(spec.body(), "");
        assert!(spec.headers().is_empty());
        assert!(spec.multipart_body().is_none());
        assert!(!spec.is_debug());
    }

    #[test]
    fn method_selectors_set_method_and_raw_path() {
        let cases: [(fn(RequestSpec, &str) -> RequestSpec, HttpMethod); 7] = [
            (RequestSpec::get, HttpMethod::Get),
            (RequestSpec::post, HttpMethod::Post),
            (RequestSpec::put, HttpMethod::Put),
            (RequestSpec::delete, HttpMethod::Delete),
            (RequestSpec::patch, HttpMethod::Patch),
            (RequestSpec::head, HttpMethod::Head),
            (RequestSpec::options, HttpMethod::Options),
        ];
        for (select, method) in cases {
            let spec = select(RequestSpec::new(), "/p?q=1");
            assert_eq!(spec.method(), method);
            assert_eq!(spec.path(), "/p?q=1", "path is stored before the query split");
        }
    }

    #[test]
    fn last_method_selector_wins() {
        let spec = RequestSpec::new().get("/a").delete("/b");
        assert_eq!(spec.method(), HttpMethod::Delete);
        assert_eq!(spec.path(), "/b");
    }

    #[test]
    fn set_header_replaces_wholesale() {
        let spec = RequestSpec::new()
            .set_header([("A", "1"), ("B", "2")])
            .set_header([("C", "3")]);
        assert_eq!(spec.headers().len(), 1);
        assert_eq!(spec.headers()["C"], "3");
    }

    #[test]
    fn empty_set_header_keeps_previous_headers() {
        let spec = RequestSpec::new()
            .set_header([("A", "1")])
            .set_header(Vec::<(String, String)>::new());
        assert_eq!(spec.headers().get("A").map(String::as_str), Some("1"));
    }

    #[test]
    fn set_json_is_compact() {
        let spec = RequestSpec::new().set_json(&serde_json::json!({"a": 1, "b": 2}));
        assert_eq!(spec.body(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn set_json_failure_leaves_body_untouched() {
        // Non-string map keys cannot be encoded as JSON object keys.
        let mut bad = HashMap::new();
        bad.insert((1, 2), 3);
        let spec = RequestSpec::new().set_body("keep me").set_json(&bad);
        assert_eq!(spec.body(), "keep me");
    }

    #[test]
    fn set_form_percent_encodes_in_key_order() {
        let spec = RequestSpec::new().set_form([("b", "x y"), ("a", "1&2")]);
        assert_eq!(spec.body(), "a=1%262&b=x+y");
    }

    #[test]
    fn set_body_ignores_empty_input() {
        let spec = RequestSpec::new().set_body("a=1").set_body("");
        assert_eq!(spec.body(), "a=1");
        let spec = spec.set_body("b=2");
        assert_eq!(spec.body(), "b=2");
    }

    #[test]
    fn set_multipart_form_injects_content_type_without_prior_headers() {
        let spec = RequestSpec::new().post("/upload").set_multipart_form([("a", "1")]);
        let content_type = &spec.headers()["Content-Type"];
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let boundary = content_type.rsplit('=').next().unwrap();
        let body = spec.multipart_body().unwrap();
        assert!(body.starts_with(format!("--{boundary}\r\n").as_bytes()));
        assert!(body.ends_with(format!("--{boundary}--\r\n").as_bytes()));
        assert_eq!(spec.body(), "", "string body is untouched");
    }

    #[test]
    fn set_multipart_form_keeps_other_headers() {
        let spec = RequestSpec::new()
            .set_header([("X-Token", "abc")])
            .set_multipart_form([("a", "1")]);
        assert_eq!(spec.headers()["X-Token"], "abc");
        assert!(spec.headers()["Content-Type"].starts_with("multipart/form-data"));
    }

    #[test]
    fn set_multipart_form_replaces_content_type_in_any_case() {
        let spec = RequestSpec::new()
            .set_header([("content-type", "text/plain")])
            .set_multipart_form([("a", "1")]);
        assert_eq!(spec.headers().len(), 1);
        assert!(spec.headers()["Content-Type"].starts_with("multipart/form-data"));
    }

    #[test]
    fn set_debug_toggles() {
        assert!(RequestSpec::new().set_debug(true).is_debug());
        assert!(!RequestSpec::new().set_debug(true).set_debug(false).is_debug());
    }
}
