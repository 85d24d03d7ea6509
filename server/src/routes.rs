use std::{net::SocketAddr, path::Path, sync::Arc, time::Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, Path as UrlPath, Query, State},
    http::{header, Request, StatusCode},
    middleware::{from_fn, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use volunteer_atlas_data_management::sheets::SheetSource;

use crate::{
    server_state::ServerState,
    tabs::{dashboard_page, render_map, render_tab, Tab, TabContent, MAP_UNAVAILABLE},
};

pub fn router<S: SheetSource>(state: Arc<ServerState<S>>, assets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(get_dashboard::<S>))
        .route("/tab/{tab}", get(get_tab::<S>))
        .route("/map", get(get_map::<S>))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .with_state(state)
        .layer(from_fn(log_request))
}

async fn log_request(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let visitor = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".into());

    let started = Instant::now();
    let response = next.run(req).await;

    tracing::debug!("{} {} from {} in {:?}", response.status(), path, visitor, started.elapsed());
    response
}

impl IntoResponse for TabContent {
    fn into_response(self) -> Response {
        match self {
            TabContent::Ready(html) => Html(html).into_response(),
            TabContent::Unavailable(html) => (StatusCode::BAD_GATEWAY, Html(html)).into_response(),
        }
    }
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    tab: Option<String>,
}

async fn get_dashboard<S: SheetSource>(State(state): State<Arc<ServerState<S>>>, Query(query): Query<DashboardQuery>) -> Response {
    let selected = match query.tab.as_deref() {
        None => Tab::Map,
        Some(id) => match Tab::from_id(id) {
            Some(tab) => tab,
            None => return StatusCode::NOT_FOUND.into_response(),
        },
    };

    let content = render_tab(&state, selected).await;
    let status = if content.is_ready() { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
    (status, Html(dashboard_page(selected, &content))).into_response()
}

/// Content swap for a single tab.
async fn get_tab<S: SheetSource>(State(state): State<Arc<ServerState<S>>>, UrlPath(tab): UrlPath<String>) -> Response {
    let Some(tab) = Tab::from_id(&tab) else {
        tracing::debug!("Unknown tab {tab}");
        return StatusCode::NOT_FOUND.into_response();
    };

    render_tab(&state, tab).await.into_response()
}

async fn get_map<S: SheetSource>(State(state): State<Arc<ServerState<S>>>) -> Response {
    match render_map(&state).await {
        Ok(document) => ([(header::CACHE_CONTROL, "no-store")], Html(document)).into_response(),
        Err(err) => {
            tracing::error!("Failed to render map: {err:#}");
            (StatusCode::BAD_GATEWAY, Html(MAP_UNAVAILABLE)).into_response()
        }
    }
}
