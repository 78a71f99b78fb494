use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/quests", post(handlers::quest_form))
        .route("/quests/:id/advance", post(handlers::advance_quest_form))
        .route("/quests/:id/delete", post(handlers::delete_quest_form))
        .route("/habits/:id/check", post(handlers::check_habit_form))
        .route("/api/quests", get(handlers::list_quests).post(handlers::create_quest))
        .route("/api/quests/:id", delete(handlers::delete_quest))
        .route("/api/quests/:id/status", post(handlers::set_quest_status))
        .route("/api/habits", get(handlers::list_habits))
        .route("/api/habits/:id/check", post(handlers::check_habit))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}
