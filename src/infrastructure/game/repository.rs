//! In-memory game repository

use std::cmp::Ordering as CmpOrdering;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::domain::game::{
    ensure_teams_persisted, Game, GamePageRequest, GameRepository, GameSortField,
};
use crate::domain::team::TeamRepository;
use crate::domain::{DomainError, EntityId, Page, SortDirection, Team};
use crate::infrastructure::team::TeamReferences;

/// A stored game row: teams are kept as references, like foreign keys
#[derive(Debug, Clone)]
struct GameRecord {
    id: EntityId,
    home_team_id: EntityId,
    visiting_team_id: EntityId,
    favorite_team_id: Option<EntityId>,
    start_date_time: NaiveDateTime,
    week_number: i32,
    line: f64,
    over_under: f64,
}

impl GameRecord {
    fn references(&self, team_id: EntityId) -> bool {
        self.home_team_id == team_id
            || self.visiting_team_id == team_id
            || self.favorite_team_id == Some(team_id)
    }

    fn compare(&self, other: &Self, field: GameSortField) -> CmpOrdering {
        match field {
            GameSortField::Id => self.id.cmp(&other.id),
            GameSortField::WeekNumber => self.week_number.cmp(&other.week_number),
            GameSortField::StartDateTime => self.start_date_time.cmp(&other.start_date_time),
            GameSortField::Line => self.line.total_cmp(&other.line),
            GameSortField::OverUnder => self.over_under.total_cmp(&other.over_under),
        }
    }
}

/// Order records by the requested properties, then by id
fn sort_records(records: &mut [GameRecord], sort: &[GameSortField], direction: SortDirection) {
    records.sort_by(|a, b| {
        for field in sort {
            let ordering = match direction {
                SortDirection::Asc => a.compare(b, *field),
                SortDirection::Desc => a.compare(b, *field).reverse(),
            };

            if ordering != CmpOrdering::Equal {
                return ordering;
            }
        }

        a.id.cmp(&b.id)
    });
}

/// Stored game rows, shared with the team repository so referenced teams
/// cannot be deleted
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    records: RwLock<BTreeMap<i64, GameRecord>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamReferences for InMemoryGameStore {
    async fn is_team_referenced(&self, team_id: EntityId) -> bool {
        self.records
            .read()
            .await
            .values()
            .any(|record| record.references(team_id))
    }
}

/// Thread-safe in-memory game repository
///
/// Teams are resolved through the team repository on every read, so renaming
/// a team is visible in the games that reference it.
pub struct InMemoryGameRepository {
    teams: Arc<dyn TeamRepository>,
    store: Arc<InMemoryGameStore>,
    sequence: AtomicI64,
}

impl Debug for InMemoryGameRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryGameRepository")
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl InMemoryGameRepository {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self::with_store(teams, Arc::new(InMemoryGameStore::new()))
    }

    pub fn with_store(teams: Arc<dyn TeamRepository>, store: Arc<InMemoryGameStore>) -> Self {
        Self {
            teams,
            store,
            sequence: AtomicI64::new(0),
        }
    }

    fn next_id(&self) -> EntityId {
        EntityId::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn snapshot(&self) -> Vec<GameRecord> {
        self.store.records.read().await.values().cloned().collect()
    }

    async fn resolve_team(&self, game_id: EntityId, team_id: EntityId) -> Result<Team, DomainError> {
        self.teams.find_by_id(team_id).await?.ok_or_else(|| {
            DomainError::storage(format!(
                "Game {} references missing team {}",
                game_id, team_id
            ))
        })
    }

    async fn resolve(&self, record: GameRecord) -> Result<Game, DomainError> {
        let home_team = self.resolve_team(record.id, record.home_team_id).await?;
        let visiting_team = self.resolve_team(record.id, record.visiting_team_id).await?;
        let favorite_team = match record.favorite_team_id {
            Some(team_id) => Some(self.resolve_team(record.id, team_id).await?),
            None => None,
        };

        Game::new(
            home_team,
            visiting_team,
            favorite_team,
            record.start_date_time,
            record.week_number,
            record.line,
            record.over_under,
        )
        .map(|game| game.with_id(record.id))
        .map_err(|e| DomainError::storage(format!("Invalid game {} in store: {}", record.id, e)))
    }

    async fn resolve_all(&self, records: Vec<GameRecord>) -> Result<Vec<Game>, DomainError> {
        let mut games = Vec::with_capacity(records.len());

        for record in records {
            games.push(self.resolve(record).await?);
        }

        Ok(games)
    }

    /// Mirror the foreign keys: every referenced team must exist
    async fn ensure_teams_exist(&self, game: &Game) -> Result<(), DomainError> {
        let teams = [Some(game.home_team()), Some(game.visiting_team()), game.favorite_team()];

        for team in teams.into_iter().flatten() {
            if let Some(id) = team.id() {
                if self.teams.find_by_id(id).await?.is_none() {
                    return Err(DomainError::validation(format!(
                        "Failed to save game: team {} does not exist",
                        id
                    )));
                }
            }
        }

        Ok(())
    }
}

fn team_id(team: &Team) -> Result<EntityId, DomainError> {
    team.id()
        .ok_or_else(|| DomainError::validation("Team must be saved before it can be used in a game"))
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Game>, DomainError> {
        let record = self.store.records.read().await.get(&id.value()).cloned();

        match record {
            Some(record) => Ok(Some(self.resolve(record).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Game>, DomainError> {
        let records = self.snapshot().await;
        self.resolve_all(records).await
    }

    async fn find_all_paged(&self, request: &GamePageRequest) -> Result<Page<Game>, DomainError> {
        let mut records = self.snapshot().await;
        sort_records(&mut records, request.sort(), request.direction());

        let total = records.len() as u64;
        let slice: Vec<GameRecord> = records
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size() as usize)
            .collect();

        let content = self.resolve_all(slice).await?;
        Ok(Page::new(content, request, total))
    }

    async fn save(&self, game: Game) -> Result<Game, DomainError> {
        ensure_teams_persisted(&game)?;
        self.ensure_teams_exist(&game).await?;

        let mut games = self.store.records.write().await;

        let id = match game.id() {
            Some(id) if !games.contains_key(&id.value()) => {
                return Err(DomainError::not_found(format!("Game {} not found", id)));
            }
            Some(id) => id,
            None => self.next_id(),
        };

        let record = GameRecord {
            id,
            home_team_id: team_id(game.home_team())?,
            visiting_team_id: team_id(game.visiting_team())?,
            favorite_team_id: game.favorite_team().map(team_id).transpose()?,
            start_date_time: game.start_date_time(),
            week_number: game.week_number(),
            line: game.line(),
            over_under: game.over_under(),
        };

        games.insert(id.value(), record);
        Ok(game.with_id(id))
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        let mut games = self.store.records.write().await;
        Ok(games.remove(&id.value()).is_some())
    }

    async fn get_games_by_week_number(&self, week_number: i32) -> Result<Vec<Game>, DomainError> {
        let mut records: Vec<GameRecord> = self
            .snapshot()
            .await
            .into_iter()
            .filter(|r| r.week_number == week_number)
            .collect();

        sort_records(&mut records, &[GameSortField::StartDateTime], SortDirection::Asc);
        self.resolve_all(records).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.store.records.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageRequest;
    use crate::infrastructure::team::InMemoryTeamRepository;
    use chrono::NaiveDate;

    struct Fixture {
        teams: Arc<InMemoryTeamRepository>,
        games: InMemoryGameRepository,
        patriots: Team,
        falcons: Team,
    }

    async fn fixture() -> Fixture {
        let teams = Arc::new(InMemoryTeamRepository::new());
        let patriots = teams.save(Team::new("New England", "Patriots").unwrap()).await.unwrap();
        let falcons = teams.save(Team::new("Atlanta", "Falcons").unwrap()).await.unwrap();
        let games = InMemoryGameRepository::new(teams.clone());

        Fixture {
            teams,
            games,
            patriots,
            falcons,
        }
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn game(f: &Fixture, week: i32, start: NaiveDateTime, line: f64) -> Game {
        let favorite = (line > 0.0).then(|| f.patriots.clone());
        Game::new(f.patriots.clone(), f.falcons.clone(), favorite, start, week, line, 50.0).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let f = fixture().await;
        let original = game(&f, 19, at(5, 18), 3.0);

        let saved = f.games.save(original.clone()).await.unwrap();
        let id = saved.id().unwrap();
        let found = f.games.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(found.id(), Some(id));
        assert_eq!(found.home_team(), original.home_team());
        assert_eq!(found.visiting_team(), original.visiting_team());
        assert_eq!(found.favorite_team(), original.favorite_team());
        assert_eq!(found.start_date_time(), original.start_date_time());
        assert_eq!(found.week_number(), 19);
        assert_eq!(found.line(), 3.0);
        assert_eq!(found.over_under(), 50.0);
    }

    #[tokio::test]
    async fn test_even_line_round_trip() {
        let f = fixture().await;
        let saved = f.games.save(game(&f, 3, at(8, 13), 0.0)).await.unwrap();

        let found = f.games.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert!(found.favorite_team().is_none());
    }

    #[tokio::test]
    async fn test_unsaved_team_is_rejected() {
        let f = fixture().await;
        let rams = Team::new("Los Angeles", "Rams").unwrap();
        let game = Game::new(rams, f.falcons.clone(), None, at(1, 13), 1, 0.0, 45.0).unwrap();

        let result = f.games.save(game).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_deleted_team_is_rejected() {
        let f = fixture().await;
        let gone = f.teams.save(Team::new("St. Louis", "Rams").unwrap()).await.unwrap();
        f.teams.delete_by_id(gone.id().unwrap()).await.unwrap();

        let game = Game::new(gone, f.falcons.clone(), None, at(1, 13), 1, 0.0, 45.0).unwrap();
        let result = f.games.save(game).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_store_reports_referenced_teams() {
        let f = fixture().await;
        let store = Arc::new(InMemoryGameStore::new());
        let games = InMemoryGameRepository::with_store(f.teams.clone(), store.clone());
        let bears = f.teams.save(Team::new("Chicago", "Bears").unwrap()).await.unwrap();

        games.save(game(&f, 19, at(5, 18), 3.0)).await.unwrap();

        assert!(store.is_team_referenced(f.patriots.id().unwrap()).await);
        assert!(store.is_team_referenced(f.falcons.id().unwrap()).await);
        assert!(!store.is_team_referenced(bears.id().unwrap()).await);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let f = fixture().await;
        let mut saved = f.games.save(game(&f, 19, at(5, 18), 3.0)).await.unwrap();

        saved.update_from(game(&f, 20, at(12, 18), 0.0));
        f.games.save(saved.clone()).await.unwrap();

        let found = f.games.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.week_number(), 20);
        assert!(found.favorite_team().is_none());
        assert_eq!(f.games.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_game_is_not_found() {
        let f = fixture().await;
        let ghost = game(&f, 1, at(1, 13), 1.0).with_id(EntityId::new(41));

        let result = f.games.save(ghost).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_games_by_week() {
        let f = fixture().await;
        f.games.save(game(&f, 2, at(9, 20), 1.0)).await.unwrap();
        f.games.save(game(&f, 1, at(1, 13), 1.0)).await.unwrap();
        f.games.save(game(&f, 2, at(9, 13), 1.0)).await.unwrap();

        let week_two = f.games.get_games_by_week_number(2).await.unwrap();
        assert_eq!(week_two.len(), 2);
        assert!(week_two.iter().all(|g| g.week_number() == 2));
        assert!(week_two[0].start_date_time() < week_two[1].start_date_time());

        assert!(f.games.get_games_by_week_number(17).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_team_rename_is_visible_through_games() {
        let f = fixture().await;
        let saved = f.games.save(game(&f, 1, at(1, 13), 1.0)).await.unwrap();

        let mut falcons = f.falcons.clone();
        falcons.set_city("Hotlanta").unwrap();
        f.teams.save(falcons).await.unwrap();

        let found = f.games.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.visiting_team().full_team_name(), "Hotlanta Falcons");
    }

    #[tokio::test]
    async fn test_paged_listing() {
        let f = fixture().await;
        for (week, line) in [(3, 1.0), (1, 7.0), (2, 3.5), (1, 2.5), (4, 0.0)] {
            f.games.save(game(&f, week, at(1, 13), line)).await.unwrap();
        }

        let request =
            PageRequest::new(0, 2, vec![GameSortField::WeekNumber], SortDirection::Asc).unwrap();
        let page = f.games.find_all_paged(&request).await.unwrap();

        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        let weeks: Vec<i32> = page.content.iter().map(Game::week_number).collect();
        assert_eq!(weeks, vec![1, 1]);
        // ties broken by id
        assert!(page.content[0].id() < page.content[1].id());

        let request =
            PageRequest::new(2, 2, vec![GameSortField::WeekNumber], SortDirection::Asc).unwrap();
        let last = f.games.find_all_paged(&request).await.unwrap();
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].week_number(), 4);
    }

    #[tokio::test]
    async fn test_paged_listing_descending_by_line() {
        let f = fixture().await;
        for line in [1.0, 7.0, 3.5] {
            f.games.save(game(&f, 1, at(1, 13), line)).await.unwrap();
        }

        let request = PageRequest::new(0, 10, vec![GameSortField::Line], SortDirection::Desc).unwrap();
        let page = f.games.find_all_paged(&request).await.unwrap();

        let lines: Vec<f64> = page.content.iter().map(Game::line).collect();
        assert_eq!(lines, vec![7.0, 3.5, 1.0]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let f = fixture().await;
        f.games.save(game(&f, 1, at(1, 13), 1.0)).await.unwrap();

        let request = PageRequest::new(5, 20, vec![GameSortField::Id], SortDirection::Asc).unwrap();
        let page = f.games.find_all_paged(&request).await.unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.number, 5);
    }

    #[tokio::test]
    async fn test_delete() {
        let f = fixture().await;
        let saved = f.games.save(game(&f, 1, at(1, 13), 1.0)).await.unwrap();

        assert!(f.games.delete_by_id(saved.id().unwrap()).await.unwrap());
        assert!(f.games.find_all().await.unwrap().is_empty());
    }
}
