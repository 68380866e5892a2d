//! HTTP data types shared by the builder and the dispatcher.
//!
//! # Design
//! `RequestSpec` stores intent as plain owned data (`HttpMethod`, `Headers`,
//! `String` body). Only the dispatcher turns that intent into an
//! `http::Request`, so the builder stays free of validation and I/O.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

/// HTTP method selected on a `RequestSpec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Methods whose body gets an inferred `Content-Type`.
    pub fn infers_content_type(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
        }
    }
}

/// Header mapping configured by the caller.
///
/// Keys are unique as written; case-insensitive matching happens only once the
/// entries are copied into the request's `http::HeaderMap`. A `RequestSpec`
/// always owns an initialized (possibly empty) map, so operations that inject
/// headers, such as `set_multipart_form`, never see an unset container.
pub type Headers = BTreeMap<String, String>;

/// The request object actually handed to the handler-under-test.
pub type MaterializedRequest = http::Request<Bytes>;
