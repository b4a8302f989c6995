//! # Content HTTP API
//!
//! Read-only endpoints for the presentation layer:
//!
//! - `GET /api/status` : loading state, provenance, banner, languages, signed-in user
//! - `GET /api/content?lang=en` : resolved tree for a language (503 while loading)
//! - `GET /api/stream` : server-sent events, one per resolution change
//!
//! Writes are not exposed here.

use crate::resolver::ResolvedContent;
use crate::sync::ContentSync;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Response,
    },
    routing::get,
    Router,
};
use folio_content::{ContentSource, ContentTree, Language};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;
use tower_http::cors::CorsLayer;

#[derive(Debug, Deserialize)]
struct ContentQuery {
    lang: Option<Language>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub loading: bool,
    pub source: Option<ContentSource>,
    pub error: Option<String>,
    pub language: Language,
    /// Target of the language switcher
    pub switch_to: Language,
    pub signed_in_as: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBody {
    pub language: Language,
    pub source: ContentSource,
    pub error: Option<String>,
    pub content: ContentTree,
}

#[derive(Debug, Serialize)]
struct StreamEvent {
    source: ContentSource,
    error: Option<String>,
    content: Option<ContentTree>,
}

pub fn router(sync: Arc<ContentSync>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/content", get(content_handler))
        .route("/api/stream", get(stream_handler))
        .with_state(sync)
        .layer(CorsLayer::permissive())
}

pub async fn serve(sync: Arc<ContentSync>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP listening on {}", listener.local_addr()?);
    axum::serve(listener, router(sync)).await
}

async fn status_handler(State(sync): State<Arc<ContentSync>>) -> Json<StatusBody> {
    let state = sync.current();
    let resolution = state.resolution();
    let language = sync.language();

    Json(StatusBody {
        loading: state.is_loading(),
        source: resolution.map(|r| r.source),
        error: resolution.and_then(|r| r.error.clone()),
        language,
        switch_to: language.other(),
        signed_in_as: sync.sessions().current().map(|s| s.email),
    })
}

async fn content_handler(
    State(sync): State<Arc<ContentSync>>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let language = query.lang.unwrap_or_else(|| sync.language());

    match sync.current() {
        ResolvedContent::Loading => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "loading" })),
        )
            .into_response(),
        ResolvedContent::Ready(resolution) => Json(ContentBody {
            language,
            source: resolution.source,
            error: resolution.error.clone(),
            content: resolution.content.get(language).clone(),
        })
        .into_response(),
    }
}

/// Streams the active language's tree whenever the resolution changes
async fn stream_handler(
    State(sync): State<Arc<ContentSync>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let language = sync.language();

    let stream = WatchStream::new(sync.watch()).filter_map(move |state| {
        let resolution = state.resolution()?;
        let event = StreamEvent {
            source: resolution.source,
            error: resolution.error.clone(),
            content: Some(resolution.content.get(language).clone()),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        Some(Ok(Event::default().event("content").data(json)))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
