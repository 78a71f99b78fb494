use crate::dates::{date_key, today};
use crate::errors::AppError;
use crate::models::{
    HabitSummary, Quest, QuestDraft, QuestForm, QuestStatus, StatsResponse, StatusRequest,
};
use crate::state::{AppState, Records};
use crate::stats::{build_stats, habit_summary};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::{info, warn};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let records = state.records.lock().await;
    let stats = build_stats(&records.quests, &records.habits);
    Html(render_index(&records.quests, &stats))
}

pub async fn list_quests(State(state): State<AppState>) -> Json<Vec<Quest>> {
    let records = state.records.lock().await;
    Json(records.quests.clone())
}

pub async fn create_quest(
    State(state): State<AppState>,
    Json(draft): Json<QuestDraft>,
) -> Result<(StatusCode, Json<Quest>), AppError> {
    let quest = insert_quest(&state, &draft)
        .await
        .ok_or_else(|| AppError::bad_request("title must not be blank"))?;
    Ok((StatusCode::CREATED, Json(quest)))
}

pub async fn set_quest_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<Quest>, AppError> {
    let quest = update_status(&state, &id, |_| payload.status).await?;
    Ok(Json(quest))
}

pub async fn delete_quest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    remove_quest(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitSummary>> {
    let records = state.records.lock().await;
    let today = today();
    Json(
        records
            .habits
            .iter()
            .map(|habit| habit_summary(habit, today))
            .collect(),
    )
}

pub async fn check_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HabitSummary>, AppError> {
    Ok(Json(mark_habit(&state, &id).await?))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let records = state.records.lock().await;
    Json(build_stats(&records.quests, &records.habits))
}

pub async fn quest_form(State(state): State<AppState>, Form(form): Form<QuestForm>) -> Redirect {
    insert_quest(&state, &QuestDraft::from(form)).await;
    Redirect::to("/")
}

pub async fn advance_quest_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    update_status(&state, &id, QuestStatus::advanced).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_quest_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    remove_quest(&state, &id).await?;
    Ok(Redirect::to("/"))
}

pub async fn check_habit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    mark_habit(&state, &id).await?;
    Ok(Redirect::to("/"))
}

async fn insert_quest(state: &AppState, draft: &QuestDraft) -> Option<Quest> {
    let Some(quest) = draft.normalize(Uuid::new_v4().to_string()) else {
        warn!("rejected quest with blank title");
        return None;
    };

    let mut records = state.records.lock().await;
    records.quests.push(quest.clone());
    state.store.save_quests(&records.quests).await;

    info!(id = %quest.id, xp = quest.xp, "quest created");
    Some(quest)
}

async fn update_status(
    state: &AppState,
    id: &str,
    next: impl FnOnce(QuestStatus) -> QuestStatus,
) -> Result<Quest, AppError> {
    let mut records = state.records.lock().await;
    let updated = {
        let quest = find_quest(&mut records, id)?;
        quest.status = next(quest.status);
        quest.clone()
    };

    state.store.save_quests(&records.quests).await;

    info!(id, status = %updated.status, "quest status changed");
    Ok(updated)
}

async fn remove_quest(state: &AppState, id: &str) -> Result<(), AppError> {
    let mut records = state.records.lock().await;
    let before = records.quests.len();
    records.quests.retain(|quest| quest.id != id);
    if records.quests.len() == before {
        return Err(AppError::not_found(format!("no quest with id '{id}'")));
    }

    state.store.save_quests(&records.quests).await;

    info!(id, "quest deleted");
    Ok(())
}

async fn mark_habit(state: &AppState, id: &str) -> Result<HabitSummary, AppError> {
    let today = today();
    let key = date_key(today);
    let mut records = state.records.lock().await;
    let (summary, added) = {
        let habit = records
            .habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or_else(|| AppError::not_found(format!("no habit with id '{id}'")))?;
        let added = habit.mark(&key);
        (habit_summary(habit, today), added)
    };

    if added {
        state.store.save_habits(&records.habits).await;
        info!(id, day = %key, streak = summary.streak, "habit checked in");
    }

    Ok(summary)
}

fn find_quest<'a>(records: &'a mut Records, id: &str) -> Result<&'a mut Quest, AppError> {
    records
        .quests
        .iter_mut()
        .find(|quest| quest.id == id)
        .ok_or_else(|| AppError::not_found(format!("no quest with id '{id}'")))
}
