//! SQLite datastore for users, games and scores.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::{
    GameProgress, GameRow, NewGameRow, NewScoreRow, NewUserRow, ScoreRow, UserRow, UserStanding,
};
use crate::db::schema;
use crate::records::{GameKey, GameRecord, NewScore, NewUser, Score, User};
use crate::store::{GameStore, ScoreStore, StoreError, UserStore};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on another writer's lock before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Datastore backed by a SQLite file.
///
/// A connection is opened per operation, so the store is cheap to clone and
/// share between request handlers and the stats worker. The database runs in
/// WAL mode and every connection waits up to five seconds for a
/// competing writer, so concurrent requests queue instead of failing.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Creates a store for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, StoreError> {
        if db_path.is_empty() {
            return Err(StoreError::new("Database path cannot be empty"));
        }
        info!(path = %db_path, "Creating SqliteStore");
        Ok(Self { db_path })
    }

    /// Applies any migrations the database has not seen yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if connecting or migrating fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        // Journal mode is stored in the file, so setting it once is enough.
        conn.batch_execute("PRAGMA journal_mode = WAL;")?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })?;
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA synchronous = NORMAL;",
            BUSY_TIMEOUT_MS
        ))?;
        Ok(conn)
    }
}

impl UserStore for SqliteStore {
    #[instrument(skip(self, user), fields(name = %user.name()))]
    fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut conn = self.connection()?;
        let row = diesel::insert_into(schema::users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)?;
        let user = User::from(row);
        info!(user_id = user.id(), name = %user.name(), "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    fn user_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.connection()?;
        let row = schema::users::table
            .filter(schema::users::name.eq(name))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .optional()?;
        debug!(found = row.is_some(), "User lookup by name");
        Ok(row.map(User::from))
    }

    #[instrument(skip(self))]
    fn user_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let mut conn = self.connection()?;
        let row = schema::users::table
            .find(id)
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .optional()?;
        Ok(row.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = user.id()))]
    fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let updated = diesel::update(schema::users::table.find(*user.id()))
            .set(UserStanding::from(user))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(StoreError::new(format!("No user with id {}", user.id())));
        }
        debug!(wins = user.wins(), losses = user.losses(), "User standing updated");
        Ok(())
    }

    #[instrument(skip(self))]
    fn users_by_rank(&self) -> Result<Vec<User>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::users::table
            .order((
                schema::users::performance.desc(),
                schema::users::wins.asc(),
            ))
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)?;
        info!(count = rows.len(), "Ranking loaded");
        Ok(rows.into_iter().map(User::from).collect())
    }
}

impl GameStore for SqliteStore {
    #[instrument(skip(self, record), fields(key = %record.key()))]
    fn insert_game(&self, record: &GameRecord) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        diesel::insert_into(schema::games::table)
            .values(NewGameRow::try_from(record)?)
            .execute(&mut conn)?;
        info!(user_id = record.user_id(), "Game stored");
        Ok(())
    }

    #[instrument(skip(self, key), fields(key = %key))]
    fn game(&self, key: &GameKey) -> Result<Option<GameRecord>, StoreError> {
        let mut conn = self.connection()?;
        let row = schema::games::table
            .filter(schema::games::game_key.eq(key.to_string()))
            .select(GameRow::as_select())
            .first::<GameRow>(&mut conn)
            .optional()?;
        row.map(GameRecord::try_from).transpose()
    }

    #[instrument(skip(self, record), fields(key = %record.key()))]
    fn save_game(&self, record: &GameRecord) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let updated = diesel::update(
            schema::games::table.filter(schema::games::game_key.eq(record.key().to_string())),
        )
        .set(GameProgress::try_from(record.game())?)
        .execute(&mut conn)?;
        if updated == 0 {
            return Err(StoreError::new(format!("No game with key {}", record.key())));
        }
        debug!(game_over = record.game().game_over(), "Game saved");
        Ok(())
    }

    #[instrument(skip(self, key), fields(key = %key))]
    fn delete_game(&self, key: &GameKey) -> Result<bool, StoreError> {
        let mut conn = self.connection()?;
        let deleted = diesel::delete(
            schema::games::table.filter(schema::games::game_key.eq(key.to_string())),
        )
        .execute(&mut conn)?;
        info!(deleted, "Game delete executed");
        Ok(deleted > 0)
    }

    #[instrument(skip(self))]
    fn active_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::games::table
            .filter(schema::games::game_over.eq(false))
            .order(schema::games::id.asc())
            .select(GameRow::as_select())
            .load::<GameRow>(&mut conn)?;
        debug!(count = rows.len(), "Active games loaded");
        rows.into_iter().map(GameRecord::try_from).collect()
    }

    #[instrument(skip(self))]
    fn active_games_for_user(&self, user_id: i32) -> Result<Vec<GameRecord>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::games::table
            .filter(schema::games::user_id.eq(user_id))
            .filter(schema::games::game_over.eq(false))
            .order(schema::games::id.asc())
            .select(GameRow::as_select())
            .load::<GameRow>(&mut conn)?;
        debug!(count = rows.len(), "Active user games loaded");
        rows.into_iter().map(GameRecord::try_from).collect()
    }
}

impl ScoreStore for SqliteStore {
    #[instrument(skip(self, score), fields(user_id = score.user_id(), won = score.won()))]
    fn insert_score(&self, score: NewScore) -> Result<Score, StoreError> {
        let mut conn = self.connection()?;
        let row = diesel::insert_into(schema::scores::table)
            .values(NewScoreRow::from(score))
            .returning(ScoreRow::as_returning())
            .get_result::<ScoreRow>(&mut conn)?;
        let score = Score::from(row);
        info!(score_id = score.id(), guesses = score.guesses(), "Score recorded");
        Ok(score)
    }

    #[instrument(skip(self))]
    fn scores(&self) -> Result<Vec<Score>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::scores::table
            .order(schema::scores::id.asc())
            .select(ScoreRow::as_select())
            .load::<ScoreRow>(&mut conn)?;
        Ok(rows.into_iter().map(Score::from).collect())
    }

    #[instrument(skip(self))]
    fn scores_for_user(&self, user_id: i32) -> Result<Vec<Score>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::scores::table
            .filter(schema::scores::user_id.eq(user_id))
            .order(schema::scores::id.asc())
            .select(ScoreRow::as_select())
            .load::<ScoreRow>(&mut conn)?;
        Ok(rows.into_iter().map(Score::from).collect())
    }

    #[instrument(skip(self))]
    fn high_scores(&self, limit: Option<usize>) -> Result<Vec<Score>, StoreError> {
        let mut conn = self.connection()?;
        let winners = schema::scores::table
            .filter(schema::scores::won.eq(true))
            .order((schema::scores::guesses.asc(), schema::scores::id.asc()))
            .select(ScoreRow::as_select());
        let rows = match limit {
            Some(limit) => winners
                .limit(i64::try_from(limit).unwrap_or(i64::MAX))
                .load::<ScoreRow>(&mut conn)?,
            None => winners.load::<ScoreRow>(&mut conn)?,
        };
        debug!(count = rows.len(), "High scores loaded");
        Ok(rows.into_iter().map(Score::from).collect())
    }
}
