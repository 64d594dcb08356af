//! Team endpoints

use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{created, CollectionResponse, Link};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path, Query};
use crate::domain::{EntityId, Team};
use crate::infrastructure::observability::record_validation_failure;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub team_id: Option<EntityId>,
    pub city: String,
    pub team_name: String,
    pub full_team_name: String,
    pub links: Vec<Link>,
}

impl TeamResponse {
    fn from_team(team: &Team, state: &AppState) -> Self {
        let links = team
            .id()
            .map(|id| vec![Link::self_link(team_path(state, id))])
            .unwrap_or_default();

        Self {
            team_id: team.id(),
            city: team.city().to_string(),
            team_name: team.team_name().to_string(),
            full_team_name: team.full_team_name(),
            links,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub city: String,
    pub team_name: String,
}

/// Exact-match filters for `GET /teams`; `name` wins when both are given
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamFilter {
    pub name: Option<String>,
    pub city: Option<String>,
}

fn team_path(state: &AppState, id: EntityId) -> String {
    state.link(&format!("/teams/{}", id))
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    Query(filter): Query<TeamFilter>,
) -> Result<Json<CollectionResponse<TeamResponse>>, ApiError> {
    debug!(name = ?filter.name, city = ?filter.city, "Listing teams");

    let teams = match (filter.name.as_deref(), filter.city.as_deref()) {
        (Some(name), city) => state
            .team_repository
            .get_team_by_team_name(name)
            .await?
            .filter(|team| city.is_none_or(|city| team.city() == city))
            .into_iter()
            .collect(),
        (None, Some(city)) => state
            .team_repository
            .get_team_by_city(city)
            .await?
            .into_iter()
            .collect(),
        (None, None) => state.team_repository.find_all().await?,
    };

    Ok(Json(CollectionResponse {
        content: teams
            .iter()
            .map(|team| TeamResponse::from_team(team, &state))
            .collect(),
        links: vec![Link::self_link(state.link("/teams"))],
    }))
}

/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id, "Getting team");

    let team = state
        .team_repository
        .find_by_id(EntityId::new(team_id))
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("A team with id {} could not be found.", team_id))
        })?;

    Ok(Json(TeamResponse::from_team(&team, &state)))
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Response, ApiError> {
    let team = Team::new(request.city, request.team_name).map_err(|e| {
        warn!(error = %e, "Rejected team");
        record_validation_failure("team");
        ApiError::bad_request(e.to_string())
    })?;

    let team = state.team_repository.save(team).await?;
    info!(team = %team, "Team created");

    let location = team
        .id()
        .map(|id| team_path(&state, id))
        .unwrap_or_else(|| state.link("/teams"));

    Ok(created(&location, TeamResponse::from_team(&team, &state)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_response_fields() {
        let state = AppState::in_memory("/footballpool");
        let team = Team::new("Atlanta", "Falcons")
            .unwrap()
            .with_id(EntityId::new(2));

        let json = serde_json::to_value(TeamResponse::from_team(&team, &state)).unwrap();

        assert_eq!(json["teamId"], 2);
        assert_eq!(json["fullTeamName"], "Atlanta Falcons");
        assert_eq!(json["links"][0]["href"], "/footballpool/teams/2");
    }

    #[test]
    fn test_create_request_uses_camel_case() {
        let request: CreateTeamRequest =
            serde_json::from_str(r#"{"city":"Atlanta","teamName":"Falcons"}"#).unwrap();

        assert_eq!(request.team_name, "Falcons");
    }
}
