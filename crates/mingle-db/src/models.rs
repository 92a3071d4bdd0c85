/// Database row types — these map directly to SQLite rows.
/// Distinct from the mingle-types wire models to keep the DB layer
/// independent.

pub struct UserRow {
    pub id: i64,
    pub uid: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub img: Option<String>,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub timestamp: String,
}

pub struct FriendRow {
    pub id: i64,
    pub name: String,
}
