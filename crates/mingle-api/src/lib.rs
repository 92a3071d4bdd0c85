pub mod auth;
pub mod error;
pub mod friends;
pub mod messages;
pub mod uploads;
pub mod users;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};

use mingle_db::Database;
use mingle_gateway::dispatcher::Dispatcher;

pub struct AppStateInner {
    pub db: Database,
    pub dispatcher: Dispatcher,
    pub upload_dir: PathBuf,
}

pub type AppState = Arc<AppStateInner>;

/// Assemble the request/response surface. The live WebSocket route is
/// attached by the server binary, which owns the upgrade handshake.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/user/{id}", get(users::get_user))
        .route("/users/{id}", put(users::update_user))
        .route("/upload/{id}", post(uploads::upload_image))
        .route("/uploads/{file_name}", get(uploads::get_image))
        .route("/addfriend/{user_id}", post(friends::add_friend))
        .route("/friendlist/{user_id}", get(friends::friend_list))
        .route(
            "/messages",
            post(messages::create_message).get(messages::list_messages),
        )
        .with_state(state)
}
