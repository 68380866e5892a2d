//! Demo routes used as the handler-under-test in end-to-end tests.

use std::collections::BTreeMap;

use axum::{
    extract::{Form, Multipart, Query},
    http::StatusCode,
    routing::{delete, get, head, options, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Echo payload. Empty fields are left out of the JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hello: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub foo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub a: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub b: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub c: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub d: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub foo: String,
}

/// Numeric body accepted by `/json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonContent {
    pub a: i64,
    pub b: i64,
}

pub fn app() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/text", get(text))
        .route("/query", get(query))
        .route("/form", post(post_form))
        .route("/json", post(json))
        .route("/update", put(update))
        .route("/delete", delete(hello))
        .route("/patch", patch(hello))
        .route("/options", options(hello))
        .route("/head", head(hello))
        .route("/upload", post(upload))
}

async fn hello() -> Json<Content> {
    Json(Content {
        hello: "world".to_string(),
        ..Content::default()
    })
}

async fn text() -> &'static str {
    "Hello World"
}

async fn query(Query(params): Query<QueryParams>) -> Json<Content> {
    Json(Content {
        hello: params.text,
        foo: params.foo,
        ..Content::default()
    })
}

async fn post_form(Form(input): Form<Content>) -> Json<Content> {
    Json(Content {
        a: input.a,
        b: input.b,
        ..Content::default()
    })
}

async fn json(Json(input): Json<JsonContent>) -> Json<JsonContent> {
    Json(input)
}

async fn update(Form(input): Form<Content>) -> Json<Content> {
    Json(Content {
        c: input.c,
        d: input.d,
        ..Content::default()
    })
}

async fn upload(
    mut multipart: Multipart,
) -> Result<Json<BTreeMap<String, String>>, StatusCode> {
    let mut fields = BTreeMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        fields.insert(name, value);
    }
    Ok(Json(fields))
}
