//! Error types for request materialization.
//!
//! # Design
//! Builder calls never fail. The only failures surface when the dispatcher
//! converts the accumulated strings into `http` types; those are reported
//! before the handler runs, so a failed dispatch never reaches the observer.
//! Handler panics are not represented here: they unwind straight out of
//! `RequestSpec::run`.

/// Errors returned by `RequestSpec::materialize` and `RequestSpec::run`.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The method, path or query could not form a valid request line.
    #[error("invalid request: {0}")]
    Request(#[from] http::Error),

    /// A configured header key is not a valid HTTP header name.
    #[error("invalid header name: {name:?}")]
    HeaderName { name: String },

    /// A configured header value contains bytes not allowed in HTTP headers.
    #[error("invalid value for header {name:?}")]
    HeaderValue { name: String },
}
