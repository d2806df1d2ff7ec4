//! SQLite implementation of [`MessageStore`].
//!
//! Uses [`sqlx`] with the `sqlite` feature.  Migrations are run
//! automatically on startup via [`SqliteStore::connect`].
//!
//! # Migrations path
//!
//! `sqlx::migrate!("./migrations")` resolves the path **at compile time**
//! relative to `CARGO_MANIFEST_DIR` (the crate root), so the directory is
//! embedded into the binary.  The database file location is determined at
//! runtime by the `BOARD_DATABASE_URL` environment variable.
//!
//! # Queries
//!
//! The `sqlx::query` (runtime-verified) form is used deliberately so that no
//! `DATABASE_URL` environment variable is needed at compile time.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

use super::{Message, MessageStore, NewMessage, StoreError, MAX_MESSAGES};

/// SQLite-backed message store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending
    /// migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://messages.db"`.  The database file is created when missing.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn append(&self, draft: NewMessage) -> Result<Message, StoreError> {
        draft.check()?;

        let create_time = Utc::now();
        // Fixed-width rendering keeps lexicographic TEXT ordering aligned
        // with chronological ordering.
        let create_time_str = create_time.to_rfc3339_opts(SecondsFormat::Micros, true);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO message (name, email, content, create_time) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.content)
        .bind(&create_time_str)
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();

        // Evict everything beyond the newest MAX_MESSAGES rows.
        sqlx::query(
            "DELETE FROM message WHERE id NOT IN \
             (SELECT id FROM message ORDER BY create_time DESC, id DESC LIMIT ?1)",
        )
        .bind(MAX_MESSAGES as i64)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Message {
            id,
            name: draft.name,
            email: draft.email,
            content: draft.content,
            create_time,
        })
    }

    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        let rows: Vec<(i64, String, String, String, String)> = sqlx::query_as(
            "SELECT id, name, email, content, create_time FROM message \
             ORDER BY create_time DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, content, create_time)| Message {
                id,
                name,
                email,
                content,
                create_time: create_time
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
            })
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
