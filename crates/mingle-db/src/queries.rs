use crate::Database;
use crate::models::{FriendRow, MessageRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Messages --

    /// Append an immutable message row. Returns the store-assigned id.
    /// The timestamp is the caller's ISO-8601 string, stored verbatim.
    pub fn insert_message(
        &self,
        sender_id: i64,
        recipient_id: i64,
        content: &str,
        timestamp: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (sender_id, recipient_id, content, timestamp) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![sender_id, recipient_id, content, timestamp],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All messages between two participants, both directions, in insertion
    /// order. Symmetric in its arguments; empty when no messages exist.
    pub fn conversation(&self, user_a: i64, user_b: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_conversation(conn, user_a, user_b))
    }

    // -- Users --

    pub fn create_user(
        &self,
        uid: &str,
        email: &str,
        password_hash: &str,
        name: &str,
        surname: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (uid, email, password, name, surname) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![uid, email, password_hash, name, surname],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email = ?1", &[&email]))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id = ?1", &[&id]))
    }

    pub fn update_user_name(&self, id: i64, name: &str, surname: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET name = ?1, surname = ?2 WHERE id = ?3",
                rusqlite::params![name, surname, id],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn set_user_image(&self, id: i64, file_name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET img = ?1 WHERE id = ?2",
                rusqlite::params![file_name, id],
            )?;
            Ok(changed > 0)
        })
    }

    // -- Friends --

    /// True when an edge exists in either direction.
    pub fn are_friends(&self, user_id: i64, friend_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM friends
                     WHERE (user_id = ?1 AND friend_id = ?2)
                        OR (user_id = ?2 AND friend_id = ?1)",
                    rusqlite::params![user_id, friend_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO friends (user_id, friend_id) VALUES (?1, ?2)",
                rusqlite::params![user_id, friend_id],
            )?;
            Ok(())
        })
    }

    /// Friends of a user: forward edges first, then users who befriended
    /// them, matching the original merge order.
    pub fn friend_list(&self, user_id: i64) -> Result<Vec<FriendRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.id, u.name FROM friends f
                   JOIN users u ON f.friend_id = u.id
                  WHERE f.user_id = ?1
                 UNION ALL
                 SELECT u.id, u.name FROM friends f
                   JOIN users u ON f.user_id = u.id
                  WHERE f.friend_id = ?1",
            )?;

            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(FriendRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_conversation(conn: &Connection, user_a: i64, user_b: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, sender_id, recipient_id, content, timestamp
         FROM messages
         WHERE (sender_id = ?1 AND recipient_id = ?2)
            OR (sender_id = ?2 AND recipient_id = ?1)
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![user_a, user_b], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                sender_id: row.get(1)?,
                recipient_id: row.get(2)?,
                content: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_user(conn: &Connection, filter: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Option<UserRow>> {
    let sql = format!(
        "SELECT id, uid, email, password, name, surname, img, created_at FROM users WHERE {}",
        filter
    );

    let row = conn
        .query_row(&sql, params, |row| {
            Ok(UserRow {
                id: row.get(0)?,
                uid: row.get(1)?,
                email: row.get(2)?,
                password: row.get(3)?,
                name: row.get(4)?,
                surname: row.get(5)?,
                img: row.get(6)?,
                created_at: row.get(7)?,
            })
        })
        .optional()?;

    Ok(row)
}
