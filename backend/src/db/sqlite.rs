use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::models::{GenerationRecord, User};

/// SQLite-backed identity store and generation log.
pub struct Store {
    conn: Mutex<Connection>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("IO error: {0}")]
    IoError(String),
    /// A user with the same email already exists.
    #[error("Email already registered")]
    Conflict,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

impl Store {
    /// Open (or create) the database at `database_url` and ensure the schema exists.
    ///
    /// Accepts a plain path, a `sqlite:` prefixed path, or `:memory:`.
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);

        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            // Create parent directories if needed
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| StoreError::IoError(e.to_string()))?;
                }
            }
            Connection::open(path)?
        };

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS generations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER REFERENCES users(id),
                platform TEXT NOT NULL,
                input_text TEXT NOT NULL,
                output_text TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_generations_user_id ON generations(user_id);",
        )?;

        tracing::info!("Store initialized with database: {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    /// Look up a user by (already normalized) email.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
                params![email],
                user_columns,
            )
            .optional()?;

        row.map(UserRow::into_user).transpose()
    }

    pub fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM users WHERE id = ?1",
                params![id],
                user_columns,
            )
            .optional()?;

        row.map(UserRow::into_user).transpose()
    }

    /// Insert a user and return its ID.
    ///
    /// The `UNIQUE` constraint on `email` is the only serialization point for
    /// concurrent registrations: a violation surfaces as [`StoreError::Conflict`].
    pub fn create_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        let now = timestamp(Utc::now());

        match conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![email, password_hash, now],
        ) {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                tracing::info!("Created new user: {} ({})", id, email);
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StoreError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Append a generation to the log and return its ID.
    pub fn append_generation(
        &self,
        user_id: Option<i64>,
        platform: &str,
        input_text: &str,
        output_text: &str,
    ) -> Result<i64, StoreError> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO generations (user_id, platform, input_text, output_text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, platform, input_text, output_text, timestamp(Utc::now())],
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!("Logged generation {} for user {:?}", id, user_id);
        Ok(id)
    }

    /// The user's most recent generations, newest first.
    pub fn list_generations(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<GenerationRecord>, StoreError> {
        let conn = self.lock()?;
        // IDs are assigned in insertion order, so they double as a chronological key.
        let mut stmt = conn.prepare(
            "SELECT id, user_id, platform, input_text, output_text, created_at
             FROM generations
             WHERE user_id = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![user_id, limit], |row| {
            Ok(GenerationRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                platform: row.get(2)?,
                input_text: row.get(3)?,
                output_text: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(records)
    }
}

struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, StoreError> {
        Ok(User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

struct GenerationRow {
    id: i64,
    user_id: Option<i64>,
    platform: String,
    input_text: String,
    output_text: String,
    created_at: String,
}

impl GenerationRow {
    fn into_record(self) -> Result<GenerationRecord, StoreError> {
        Ok(GenerationRecord {
            id: self.id,
            user_id: self.user_id,
            platform: self.platform,
            input_text: self.input_text,
            output_text: self.output_text,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn user_columns(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::DatabaseError(format!("Bad timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn store() -> Store {
        Store::new(":memory:").unwrap()
    }

    #[test]
    fn test_create_and_find_user() {
        let store = store();
        let id = store.create_user("a@b.com", "$argon2id$hash").unwrap();

        let user = store.find_user_by_email("a@b.com").unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.password_hash, "$argon2id$hash");

        let by_id = store.find_user_by_id(id).unwrap().unwrap();
        assert_eq!(by_id, user);
    }

    #[test]
    fn test_find_missing_user() {
        let store = store();
        assert!(store.find_user_by_email("nobody@b.com").unwrap().is_none());
        assert!(store.find_user_by_id(99).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = store();
        store.create_user("a@b.com", "h1").unwrap();

        assert!(matches!(
            store.create_user("a@b.com", "h2"),
            Err(StoreError::Conflict)
        ));
        assert_eq!(store.find_user_by_email("a@b.com").unwrap().unwrap().password_hash, "h1");
    }

    #[test]
    fn test_concurrent_duplicate_inserts_one_winner() {
        let store = Arc::new(store());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.create_user("race@b.com", &format!("h{}", i)))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(StoreError::Conflict))));
    }

    #[test]
    fn test_generations_newest_first_and_limited() {
        let store = store();
        let user = store.create_user("a@b.com", "h").unwrap();

        for i in 0..5 {
            store
                .append_generation(Some(user), "twitter", &format!("in {}", i), &format!("out {}", i))
                .unwrap();
        }

        let history = store.list_generations(user, 3).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].input_text, "in 4");
        assert_eq!(history[1].input_text, "in 3");
        assert_eq!(history[2].input_text, "in 2");
        assert!(history.iter().all(|r| r.user_id == Some(user)));
    }

    #[test]
    fn test_generations_scoped_to_user() {
        let store = store();
        let alice = store.create_user("alice@b.com", "h").unwrap();
        let bob = store.create_user("bob@b.com", "h").unwrap();

        store.append_generation(Some(alice), "linkedin", "a", "A").unwrap();
        store.append_generation(Some(bob), "medium", "b", "B").unwrap();
        store.append_generation(None, "twitter", "anon", "ANON").unwrap();

        let history = store.list_generations(alice, 20).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].platform, "linkedin");
        assert_eq!(history[0].output_text, "A");
    }

    #[test]
    fn test_timestamps_round_trip() {
        let store = store();
        let before = Utc::now();
        let user = store.create_user("a@b.com", "h").unwrap();
        store.append_generation(Some(user), "twitter", "in", "out").unwrap();

        let created = store.find_user_by_id(user).unwrap().unwrap().created_at;
        assert!(created >= before - chrono::Duration::seconds(1));

        let record = &store.list_generations(user, 1).unwrap()[0];
        assert!(record.created_at >= created - chrono::Duration::seconds(1));
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("repurpose.db");
        let url = format!("sqlite:{}", path.display());

        let id = Store::new(&url).unwrap().create_user("a@b.com", "h").unwrap();

        let reopened = Store::new(&url).unwrap();
        assert_eq!(reopened.find_user_by_email("a@b.com").unwrap().unwrap().id, id);
    }
}
