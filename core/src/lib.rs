//! In-process HTTP request simulator for exercising request handlers.
//!
//! # Overview
//! Describe a request with the fluent `RequestSpec` builder, then `run` it
//! against a `Handler`. The builder is materialized into an `http::Request`
//! (query split, user agent, inferred content type, explicit headers,
//! multipart body), the handler writes into a `ResponseRecorder`, and an
//! observer closure receives the recorder and the request for assertions.
//! No sockets are opened and nothing runs in the background.
//!
//! ```no_run
//! use fight_core::{handler_fn, RequestSpec};
//!
//! let hello = handler_fn(|w, _| w.write(br#"{"hello":"world"}"#));
//! RequestSpec::new()
//!     .get("/hello")
//!     .run(&hello, |res, _req| {
//!         assert_eq!(res.status(), 200);
//!         assert!(res.body_string().contains(r#""hello":"world""#));
//!     })
//!     .unwrap();
//! ```
//!
//! # Design
//! - `RequestSpec` holds plain owned data and never fails; all `http` type
//!   validation happens in `materialize`.
//! - `Handler` is synchronous. `TowerHandler` adapts async `tower` services
//!   such as an `axum::Router` by blocking on a private runtime.
//! - Debug output goes through `tracing` and never changes behavior.

pub mod consts;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod http;
pub mod multipart;
pub mod recorder;
pub mod request;

pub use crate::dispatch::{request_target, split_query};
pub use crate::error::DispatchError;
pub use crate::handler::{handler_fn, Handler, HandlerFn, TowerHandler};
pub use crate::http::{Headers, HttpMethod, MaterializedRequest};
pub use crate::multipart::MultipartForm;
pub use crate::recorder::ResponseRecorder;
pub use crate::request::RequestSpec;
