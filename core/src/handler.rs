//! The capability the dispatcher drives: anything that can serve a request
//! into a `ResponseRecorder`.
//!
//! # Design
//! `Handler` is deliberately synchronous. Async services (an `axum::Router`,
//! any `tower::Service`) are adapted by `TowerHandler`, which blocks on a
//! private current-thread runtime for each call, so a dispatch still runs
//! to completion before `run` returns.

use std::convert::Infallible;
use std::{fmt, panic, thread};

use bytes::Bytes;
use http::{response, Request, Response};
use http_body_util::{BodyExt, Full};
use tokio::runtime::Handle;
use tower::{Service, ServiceExt};

use crate::http::MaterializedRequest;
use crate::recorder::ResponseRecorder;

/// A request handler under test.
pub trait Handler {
    /// Serve `request`, writing status, headers and body into `recorder`.
    fn serve(&self, recorder: &mut ResponseRecorder, request: &MaterializedRequest);
}

/// `Handler` backed by a closure. Build with `handler_fn`.
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap a closure as a `Handler`.
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut ResponseRecorder, &MaterializedRequest),
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut ResponseRecorder, &MaterializedRequest),
{
    fn serve(&self, recorder: &mut ResponseRecorder, request: &MaterializedRequest) {
        (self.f)(recorder, request)
    }
}

/// Drives a `tower::Service` (for example an `axum::Router`) synchronously.
///
/// Each call gets its own current-thread runtime. When `serve` is reached
/// from inside another runtime, such as a `#[tokio::test]` body, the service
/// is driven on a scoped OS thread, because a runtime refuses to block inside
/// another one. Either way the call returns only once the response body is
/// fully collected.
pub struct TowerHandler<S> {
    service: S,
}

impl<S> TowerHandler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S, B> Handler for TowerHandler<S>
where
    S: Service<Request<Full<Bytes>>, Response = Response<B>, Error = Infallible> + Clone + Send,
    B: http_body::Body<Data = Bytes>,
    B::Error: fmt::Display,
{
    fn serve(&self, recorder: &mut ResponseRecorder, request: &MaterializedRequest) {
        let request = to_service_request(request);
        let service = self.service.clone();
        let call = move || drive(service, request);

        let (parts, body) = if Handle::try_current().is_ok() {
            thread::scope(|scope| match scope.spawn(call).join() {
                Ok(output) => output,
                Err(payload) => panic::resume_unwind(payload),
            })
        } else {
            call()
        };

        recorder.write_header(parts.status);
        for (name, value) in parts.headers.iter() {
            recorder.headers_mut().append(name.clone(), value.clone());
        }
        recorder.write(&body);
    }
}

/// Run one request through `service` on a fresh runtime and collect the body.
///
/// Failing to start the runtime or to read the body is a handler failure and
/// propagates as a panic.
fn drive<S, B>(service: S, request: Request<Full<Bytes>>) -> (response::Parts, Bytes)
where
    S: Service<Request<Full<Bytes>>, Response = Response<B>, Error = Infallible>,
    B: http_body::Body<Data = Bytes>,
    B::Error: fmt::Display,
{
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => panic!("handler runtime failed to start: {err}"),
    };

    runtime.block_on(async move {
        let response = match service.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let (parts, body) = response.into_parts();
        match body.collect().await {
            Ok(collected) => (parts, collected.to_bytes()),
            Err(err) => panic!("handler response body failed: {err}"),
        }
    })
}

fn to_service_request(request: &MaterializedRequest) -> Request<Full<Bytes>> {
    let mut out = Request::new(Full::new(request.body().clone()));
    *out.method_mut() = request.method().clone();
    *out.uri_mut() = request.uri().clone();
    *out.version_mut() = request.version();
    *out.headers_mut() = request.headers().clone();
    out
}
