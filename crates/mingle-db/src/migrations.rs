use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            uid         TEXT NOT NULL UNIQUE,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            name        TEXT NOT NULL,
            surname     TEXT NOT NULL,
            img         TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Message rows are immutable once inserted; sender/recipient refer
        -- to users owned by the directory but are deliberately not enforced
        -- as foreign keys here.
        CREATE TABLE IF NOT EXISTS messages (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            sender_id       INTEGER NOT NULL,
            recipient_id    INTEGER NOT NULL,
            content         TEXT NOT NULL,
            timestamp       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_pair
            ON messages(sender_id, recipient_id);

        CREATE TABLE IF NOT EXISTS friends (
            user_id     INTEGER NOT NULL,
            friend_id   INTEGER NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (user_id, friend_id)
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
