//! Football pool endpoints: games and teams

pub mod games;
pub mod teams;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use super::state::AppState;
use super::types::Json;

/// Create the pool router, mounted under the configured base path
pub fn create_pool_router() -> Router<AppState> {
    Router::new()
        .route("/games", get(games::list_games).post(games::create_game))
        .route("/games/paged", get(games::list_games_paged))
        .route("/games/week/{week_number}", get(games::get_games_by_week))
        .route("/games/{game_id}", get(games::get_game).put(games::update_game))
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/{team_id}", get(teams::get_team))
}

/// Hypermedia link attached to every resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    pub fn self_link(href: impl Into<String>) -> Self {
        Self::new("self", href)
    }
}

/// `{content, links}` wrapper for unpaged listings
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse<T> {
    pub content: Vec<T>,
    pub links: Vec<Link>,
}

/// 201 Created with a `Location` header and the new representation
pub(crate) fn created<T: Serialize>(location: &str, body: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(body)).into_response();

    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }

    response
}
