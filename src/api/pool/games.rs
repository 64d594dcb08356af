//! Game endpoints

use axum::{extract::State, response::Response};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{created, CollectionResponse, Link};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path, Query};
use crate::domain::paging::DEFAULT_PAGE_SIZE;
use crate::domain::{
    EntityId, Game, GamePageRequest, GameSortField, Page, PagingError, SortDirection,
};
use crate::infrastructure::game::{GameCreationResult, GameRequest};
use crate::infrastructure::observability::record_game_saved;

/// Game representation with flattened team names
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game_id: Option<EntityId>,
    pub home_team_city: String,
    pub home_team_name: String,
    pub visiting_team_city: String,
    pub visiting_team_name: String,
    /// Null for an even line
    pub favorite_team_city: Option<String>,
    pub favorite_team_name: Option<String>,
    pub start_date_time: NaiveDateTime,
    pub week_number: i32,
    pub line: f64,
    pub over_under: f64,
    pub links: Vec<Link>,
}

impl GameResponse {
    fn from_game(game: &Game, state: &AppState) -> Self {
        let links = game
            .id()
            .map(|id| vec![Link::self_link(game_path(state, id))])
            .unwrap_or_default();

        Self {
            game_id: game.id(),
            home_team_city: game.home_team().city().to_string(),
            home_team_name: game.home_team().team_name().to_string(),
            visiting_team_city: game.visiting_team().city().to_string(),
            visiting_team_name: game.visiting_team().team_name().to_string(),
            favorite_team_city: game.favorite_team().map(|t| t.city().to_string()),
            favorite_team_name: game.favorite_team().map(|t| t.team_name().to_string()),
            start_date_time: game.start_date_time(),
            week_number: game.week_number(),
            line: game.line(),
            over_under: game.over_under(),
            links,
        }
    }
}

/// Page numbers and totals of a paged listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedGamesResponse {
    pub content: Vec<GameResponse>,
    pub page: PageMetadata,
    pub links: Vec<Link>,
}

/// Query string of `GET /games/paged`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagedGamesQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Comma separated property names
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl PagedGamesQuery {
    fn to_page_request(&self) -> Result<GamePageRequest, PagingError> {
        let mut sort = match self.sort.as_deref() {
            Some(sort) => sort
                .split(',')
                .filter(|property| !property.trim().is_empty())
                .map(GameSortField::parse)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        if sort.is_empty() {
            sort.push(GameSortField::WeekNumber);
        }

        let direction = match self.direction.as_deref() {
            Some(direction) => SortDirection::parse(direction)?,
            None => SortDirection::Asc,
        };

        GamePageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
            direction,
        )
    }
}

fn game_path(state: &AppState, id: EntityId) -> String {
    state.link(&format!("/games/{}", id))
}

fn page_link(state: &AppState, rel: &str, request: &GamePageRequest, page: u64) -> Link {
    let sort = request
        .sort()
        .iter()
        .map(GameSortField::property)
        .collect::<Vec<_>>()
        .join(",");
    let direction = match request.direction() {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    };

    Link::new(
        rel,
        state.link(&format!(
            "/games/paged?page={}&size={}&sort={}&direction={}",
            page,
            request.size(),
            sort,
            direction
        )),
    )
}

fn page_links<T>(state: &AppState, request: &GamePageRequest, page: &Page<T>) -> Vec<Link> {
    let number = u64::from(page.number);
    let mut links = vec![
        page_link(state, "self", request, number),
        page_link(state, "first", request, 0),
    ];

    if number > 0 {
        links.push(page_link(state, "prev", request, number - 1));
    }
    if number + 1 < page.total_pages {
        links.push(page_link(state, "next", request, number + 1));
    }
    if page.total_pages > 0 {
        links.push(page_link(state, "last", request, page.total_pages - 1));
    }

    links
}

fn validation_error(result: &GameCreationResult) -> ApiError {
    ApiError::validation_failed(
        result.validation_issue_summary(),
        result.validation_issues().to_vec(),
    )
}

/// GET /games
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<CollectionResponse<GameResponse>>, ApiError> {
    debug!("Listing all games");

    let games = state.game_repository.find_all().await?;

    Ok(Json(CollectionResponse {
        content: games
            .iter()
            .map(|game| GameResponse::from_game(game, &state))
            .collect(),
        links: vec![Link::self_link(state.link("/games"))],
    }))
}

/// GET /games/paged
pub async fn list_games_paged(
    State(state): State<AppState>,
    Query(query): Query<PagedGamesQuery>,
) -> Result<Json<PagedGamesResponse>, ApiError> {
    let request = query.to_page_request().map_err(|e| {
        warn!(error = %e, "Rejected paged game query");
        ApiError::bad_request(e.to_string()).with_code("invalid_paging")
    })?;

    debug!(page = request.page(), size = request.size(), "Listing games page");

    let page = state.game_repository.find_all_paged(&request).await?;
    let links = page_links(&state, &request, &page);
    let page = page.map(|game| GameResponse::from_game(&game, &state));

    Ok(Json(PagedGamesResponse {
        page: PageMetadata {
            size: page.size,
            number: page.number,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        },
        content: page.content,
        links,
    }))
}

/// GET /games/week/{week_number}
pub async fn get_games_by_week(
    State(state): State<AppState>,
    Path(week_number): Path<i32>,
) -> Result<Json<CollectionResponse<GameResponse>>, ApiError> {
    debug!(week_number, "Getting games by week");

    let games = state
        .game_repository
        .get_games_by_week_number(week_number)
        .await?;

    if games.is_empty() {
        return Err(ApiError::not_found(format!(
            "Games played during week {} were not found.",
            week_number
        )));
    }

    Ok(Json(CollectionResponse {
        content: games
            .iter()
            .map(|game| GameResponse::from_game(game, &state))
            .collect(),
        links: vec![Link::self_link(
            state.link(&format!("/games/week/{}", week_number)),
        )],
    }))
}

/// GET /games/{game_id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameResponse>, ApiError> {
    debug!(game_id, "Getting game");

    let game = state
        .game_repository
        .find_by_id(EntityId::new(game_id))
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("A game with id {} could not be found.", game_id))
        })?;

    Ok(Json(GameResponse::from_game(&game, &state)))
}

/// POST /games
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<GameRequest>,
) -> Result<Response, ApiError> {
    let result = state.game_service.create_game_from_request(&request).await?;

    if result.has_validation_issues() {
        return Err(validation_error(&result));
    }

    let game = result
        .into_game()
        .ok_or_else(|| ApiError::internal("Game was neither created nor rejected"))?;
    let game = state.game_repository.save(game).await?;

    info!(game = %game, "Game created");
    record_game_saved("create");

    let response = GameResponse::from_game(&game, &state);
    let location = game
        .id()
        .map(|id| game_path(&state, id))
        .unwrap_or_else(|| state.link("/games"));

    Ok(created(&location, response))
}

/// PUT /games/{game_id}
///
/// Replaces every field of the stored game. Answers 201 like the create path.
pub async fn update_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
    Json(request): Json<GameRequest>,
) -> Result<Response, ApiError> {
    let id = EntityId::new(game_id);

    let mut existing = state.game_repository.find_by_id(id).await?.ok_or_else(|| {
        ApiError::not_found(format!("A game with id \"{}\" does not exist.", game_id))
    })?;

    let result = state.game_service.create_game_from_request(&request).await?;
    if result.has_validation_issues() {
        return Err(validation_error(&result));
    }

    let replacement = result
        .into_game()
        .ok_or_else(|| ApiError::internal("Game was neither created nor rejected"))?;
    existing.update_from(replacement);

    let game = state.game_repository.save(existing).await?;

    info!(game = %game, "Game updated");
    record_game_saved("update");

    Ok(created(&game_path(&state, id), GameResponse::from_game(&game, &state)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(sort: Option<&str>, direction: Option<&str>, size: Option<u32>) -> PagedGamesQuery {
        PagedGamesQuery {
            page: None,
            size,
            sort: sort.map(str::to_string),
            direction: direction.map(str::to_string),
        }
    }

    #[test]
    fn test_paged_query_defaults() {
        let request = PagedGamesQuery::default().to_page_request().unwrap();

        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort(), [GameSortField::WeekNumber]);
        assert_eq!(request.direction(), SortDirection::Asc);
    }

    #[test]
    fn test_paged_query_parses_sort_list() {
        let request = query(Some("startDateTime, overUnder,"), Some("DESC"), Some(5))
            .to_page_request()
            .unwrap();

        assert_eq!(
            request.sort(),
            [GameSortField::StartDateTime, GameSortField::OverUnder]
        );
        assert_eq!(request.direction(), SortDirection::Desc);
        assert_eq!(request.size(), 5);
    }

    #[test]
    fn test_paged_query_rejects_bad_input() {
        assert!(matches!(
            query(Some("homeTeam"), None, None).to_page_request(),
            Err(PagingError::InvalidSortProperty(_))
        ));
        assert!(matches!(
            query(None, Some("sideways"), None).to_page_request(),
            Err(PagingError::InvalidDirection(_))
        ));
        assert!(matches!(
            query(None, None, Some(0)).to_page_request(),
            Err(PagingError::InvalidSize(0))
        ));
        assert!(matches!(
            query(None, None, Some(2001)).to_page_request(),
            Err(PagingError::InvalidSize(2001))
        ));
    }

    #[test]
    fn test_page_links() {
        let state = AppState::in_memory("/footballpool");
        let request = GamePageRequest::new(1, 2, vec![GameSortField::Line], SortDirection::Desc)
            .unwrap();
        let page: Page<()> = Page::new(vec![(), ()], &request, 5);

        let links = page_links(&state, &request, &page);
        let rels: Vec<_> = links.iter().map(|l| l.rel.as_str()).collect();

        assert_eq!(rels, ["self", "first", "prev", "next", "last"]);
        assert_eq!(
            links[0].href,
            "/footballpool/games/paged?page=1&size=2&sort=line&direction=desc"
        );
        assert_eq!(
            links[4].href,
            "/footballpool/games/paged?page=2&size=2&sort=line&direction=desc"
        );
    }

    #[test]
    fn test_page_links_for_empty_listing() {
        let state = AppState::in_memory("");
        let request = GamePageRequest::new(0, 20, vec![GameSortField::Id], SortDirection::Asc)
            .unwrap();
        let page: Page<()> = Page::new(vec![], &request, 0);

        let rels: Vec<_> = page_links(&state, &request, &page)
            .into_iter()
            .map(|l| l.rel)
            .collect();

        assert_eq!(rels, ["self", "first"]);
    }
}
