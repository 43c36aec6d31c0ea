//! Database module
//!
//! Durable storage for one preference record per user.

mod schema;

use schema::{MIGRATION_ADD_TIMESTAMPS, MIGRATION_TYPED_STATE, SCHEMA};

use crate::state_machine::state::non_blank;
use crate::state_machine::{ConvState, UserId, UserPreferences};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;

        // Tables created by older releases lack the timestamp columns
        for statement in MIGRATION_ADD_TIMESTAMPS {
            let _ = conn.execute(statement, []);
        }

        conn.execute_batch(MIGRATION_TYPED_STATE)?;
        Ok(())
    }

    // ==================== User Operations ====================

    /// Get the stored record for a user, if they have ever interacted
    pub fn get_user(&self, chat_id: UserId) -> DbResult<Option<UserPreferences>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT state, property_type, price_range, bedrooms, furnished, area
             FROM users WHERE chat_id = ?1",
        )?;

        let prefs = stmt
            .query_row(params![chat_id.0], |row| {
                let state: Option<String> = row.get(0)?;
                Ok(UserPreferences {
                    state: state.as_deref().map_or(ConvState::Initial, ConvState::from_stored),
                    property_type: non_blank(row.get(1)?),
                    price_range: non_blank(row.get(2)?),
                    bedrooms: non_blank(row.get(3)?),
                    furnished: non_blank(row.get(4)?),
                    area: non_blank(row.get(5)?),
                })
            })
            .optional()?;
        Ok(prefs)
    }

    /// Insert or overwrite every field of a user's record
    pub fn save_user(&self, chat_id: UserId, prefs: &UserPreferences) -> DbResult<()> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO users (chat_id, state, property_type, price_range, bedrooms, furnished, area, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             ON CONFLICT(chat_id) DO UPDATE SET
                state = excluded.state,
                property_type = excluded.property_type,
                price_range = excluded.price_range,
                bedrooms = excluded.bedrooms,
                furnished = excluded.furnished,
                area = excluded.area,
                updated_at = excluded.updated_at",
            params![
                chat_id.0,
                prefs.state.to_stored(),
                prefs.property_type,
                prefs.price_range,
                prefs.bedrooms,
                prefs.furnished,
                prefs.area,
                now,
            ],
        )?;
        Ok(())
    }

    /// Number of users with a stored record
    pub fn user_count(&self) -> DbResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
