use std::sync::Arc;

use tokio::sync::RwLock;
use validator::Validate;

use crate::errors::ServiceError;
use crate::games::models::{fixtures, CreateGame, Game, GamePatch};
use crate::storage::Storage;

const SNAPSHOT: &str = "games";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Catalog {
    games: Vec<Game>,
    /// ids handed out by the catalog are never reused, even after a delete
    next_id: u64,
}

impl Catalog {
    fn seeded() -> Self {
        let games = fixtures();
        let next_id = games.len() as u64 + 1;
        Catalog { games, next_id }
    }

    fn contains(&self, id: &str) -> bool {
        self.games.iter().any(|game| game.id == id)
    }

    fn assign_id(&mut self) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id += 1;
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

/// The games customers can book a package for.
///
/// Every change is written to storage before it becomes visible, a change
/// that can't be stored is not applied.
#[derive(Debug, Clone)]
pub struct GameCatalog {
    inner: Arc<RwLock<Catalog>>,
    storage: Storage,
}

impl GameCatalog {
    pub fn load(storage: Storage) -> Result<Self, ServiceError> {
        let catalog = match storage.load::<Catalog>(SNAPSHOT)? {
            Some(catalog) => catalog,
            None => {
                info!("seeding the game catalog");
                Catalog::seeded()
            }
        };

        Ok(GameCatalog {
            inner: Arc::new(RwLock::new(catalog)),
            storage,
        })
    }

    /// all games, in the order they were added
    pub async fn list(&self) -> Vec<Game> {
        self.inner.read().await.games.clone()
    }

    pub async fn find(&self, id: &str) -> Result<Game, ServiceError> {
        let catalog = self.inner.read().await;

        match catalog.games.iter().find(|game| game.id == id) {
            Some(game) => Ok(game.clone()),
            None => not_found!(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, new_game: CreateGame) -> Result<Game, ServiceError> {
        new_game.validate()?;

        let mut catalog = self.inner.write().await;
        let mut next = catalog.clone();

        let id = match new_game.id.clone() {
            Some(id) if !id.is_empty() => {
                if next.contains(&id) {
                    return Err(ServiceError::Conflict(format!(
                        "a game with id {} already exists",
                        id
                    )));
                }
                id
            }
            _ => next.assign_id(),
        };

        let game = new_game.into_game(id);
        next.games.push(game.clone());

        self.storage.save(SNAPSHOT, &next).await?;
        *catalog = next;

        info!("created game {}: {}", game.id, game.label());
        Ok(game)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: &str, patch: GamePatch) -> Result<Game, ServiceError> {
        patch.validate()?;

        let mut catalog = self.inner.write().await;
        let mut next = catalog.clone();

        let game = match next.games.iter_mut().find(|game| game.id == id) {
            Some(game) => game,
            None => not_found!(),
        };
        game.apply(patch);
        let game = game.clone();

        self.storage.save(SNAPSHOT, &next).await?;
        *catalog = next;

        info!("updated game {}", game.id);
        Ok(game)
    }

    /// bookings that mention the game are left as they are
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut catalog = self.inner.write().await;

        let position = match catalog.games.iter().position(|game| game.id == id) {
            Some(position) => position,
            None => not_found!(),
        };

        let mut next = catalog.clone();
        next.games.remove(position);

        self.storage.save(SNAPSHOT, &next).await?;
        *catalog = next;

        info!("deleted game {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Availability;
    use crate::storage::scratch_dir;
    use serde_json::json;

    fn catalog() -> GameCatalog {
        GameCatalog::load(Storage::in_memory()).unwrap()
    }

    fn new_game(id: Option<&str>) -> CreateGame {
        let mut value = json!({
            "homeTeam": "EA7 Emporio Armani Milan",
            "awayTeam": "Zalgiris",
            "date": "2026-03-12",
            "time": "20:30",
            "venue": "Unipol Forum",
            "city": "Milan",
            "estimatedPrice": "From CHF 400",
            "availability": "high"
        });
        if let Some(id) = id {
            value["id"] = json!(id);
        }
        serde_json::from_value(value).unwrap()
    }

    #[actix_rt::test]
    async fn starts_with_the_fixtures() {
        let games = catalog().list().await;

        let ids: Vec<&str> = games.iter().map(|game| game.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[actix_rt::test]
    async fn created_games_get_a_fresh_id() {
        let catalog = catalog();

        let game = catalog.create(new_game(None)).await.unwrap();

        assert_eq!(game.id, "7");
        assert_eq!(catalog.list().await.last(), Some(&game));
        assert_eq!(catalog.find("7").await.unwrap(), game);
    }

    #[actix_rt::test]
    async fn ids_are_not_reused_after_a_delete() {
        let catalog = catalog();

        let first = catalog.create(new_game(None)).await.unwrap();
        catalog.delete(&first.id).await.unwrap();
        let second = catalog.create(new_game(None)).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[actix_rt::test]
    async fn assigned_ids_skip_ids_chosen_by_the_admin() {
        let catalog = catalog();

        catalog.create(new_game(Some("7"))).await.unwrap();
        let game = catalog.create(new_game(None)).await.unwrap();

        assert_eq!(game.id, "8");
    }

    #[actix_rt::test]
    async fn duplicate_ids_are_a_conflict() {
        let catalog = catalog();

        let result = catalog.create(new_game(Some("3"))).await;

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(catalog.list().await.len(), 6);
    }

    #[actix_rt::test]
    async fn blank_venues_are_rejected() {
        let mut game = new_game(None);
        game.venue = String::new();

        let result = catalog().create(game).await;

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    #[actix_rt::test]
    async fn update_merges_the_patch() {
        let catalog = catalog();
        let patch = GamePatch {
            availability: Some(Availability::Low),
            estimated_price: Some("From CHF 610".to_string()),
            ..GamePatch::default()
        };

        let game = catalog.update("1", patch).await.unwrap();

        assert_eq!(game.availability, Availability::Low);
        assert_eq!(game.estimated_price, "From CHF 610");
        assert_eq!(game.away_team, "Real Madrid");
        assert_eq!(catalog.find("1").await.unwrap(), game);
    }

    #[actix_rt::test]
    async fn update_of_an_unknown_game() {
        let result = catalog().update("42", GamePatch::default()).await;

        assert_eq!(result, Err(ServiceError::NotFound));
    }

    #[actix_rt::test]
    async fn deleting_twice_fails_the_same_way() {
        let catalog = catalog();

        catalog.delete("2").await.unwrap();
        let before = catalog.list().await;

        assert_eq!(catalog.delete("2").await, Err(ServiceError::NotFound));
        assert_eq!(catalog.delete("2").await, Err(ServiceError::NotFound));
        assert_eq!(catalog.list().await, before);
        assert_eq!(catalog.find("2").await, Err(ServiceError::NotFound));
    }

    #[actix_rt::test]
    async fn catalog_survives_a_restart() {
        let dir = scratch_dir();
        let catalog = GameCatalog::load(Storage::on_disk(&dir)).unwrap();

        catalog.delete("1").await.unwrap();
        let created = catalog.create(new_game(None)).await.unwrap();

        let restarted = GameCatalog::load(Storage::on_disk(&dir)).unwrap();
        let games = restarted.list().await;
        assert_eq!(games.len(), 6);
        assert_eq!(games.last(), Some(&created));
        assert_eq!(restarted.create(new_game(None)).await.unwrap().id, "8");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[actix_rt::test]
    async fn concurrent_creates_keep_every_game() {
        let dir = scratch_dir();
        let catalog = GameCatalog::load(Storage::on_disk(&dir)).unwrap();

        let (a, b, c) = futures::join!(
            catalog.create(new_game(None)),
            catalog.create(new_game(None)),
            catalog.create(new_game(None)),
        );

        let mut ids = vec![a.unwrap().id, b.unwrap().id, c.unwrap().id];
        ids.sort();
        ids.dedup();
        assert_eq!(ids, vec!["7", "8", "9"]);
        assert_eq!(catalog.list().await.len(), 9);

        let restarted = GameCatalog::load(Storage::on_disk(&dir)).unwrap();
        assert_eq!(restarted.list().await, catalog.list().await);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[actix_rt::test]
    async fn failed_writes_leave_the_catalog_unchanged() {
        let blocker = scratch_dir();
        std::fs::write(&blocker, b"").unwrap();
        let catalog = GameCatalog::load(Storage::on_disk(blocker.join("data"))).unwrap();

        assert!(matches!(
            catalog.create(new_game(None)).await,
            Err(ServiceError::Persistence(_))
        ));
        assert!(matches!(
            catalog.delete("1").await,
            Err(ServiceError::Persistence(_))
        ));
        assert_eq!(catalog.list().await, fixtures());

        std::fs::remove_file(blocker).unwrap();
    }
}
