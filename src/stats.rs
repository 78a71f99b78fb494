use crate::dates::{date_key, days_between, today};
use crate::models::{
    DailyPoint, Habit, HabitSummary, Quest, QuestStats, QuestStatus, StatsResponse,
};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// XP needed per level. Does not scale with the level number.
pub const LEVEL_XP: u64 = 200;
pub const WEEK_DAYS: u32 = 7;

pub fn quest_stats(quests: &[Quest]) -> QuestStats {
    let total = quests.len();
    let completed = quests
        .iter()
        .filter(|quest| quest.status == QuestStatus::Done)
        .count();
    let total_xp = quests
        .iter()
        .filter(|quest| quest.status == QuestStatus::Done)
        .fold(0u64, |sum, quest| sum.saturating_add(quest.xp));

    QuestStats {
        total,
        completed,
        active: total - completed,
        total_xp,
        level: total_xp / LEVEL_XP + 1,
        current_level_xp: total_xp % LEVEL_XP,
        next_level_xp: LEVEL_XP,
    }
}

/// Done quests counted per due date. There is no completed-on field, so a
/// quest finished late still lands in its due date's bucket.
pub fn completion_history(quests: &[Quest]) -> BTreeMap<String, u64> {
    let mut history = BTreeMap::new();
    for quest in quests {
        if quest.status != QuestStatus::Done {
            continue;
        }
        if let Some(due) = &quest.due_date {
            *history.entry(due.clone()).or_insert(0) += 1;
        }
    }
    history
}

pub fn daily_series(history: &BTreeMap<String, u64>, today: NaiveDate, days: u32) -> Vec<DailyPoint> {
    let mut points = Vec::with_capacity(days as usize);
    for offset in (0..days).rev() {
        let date = today - Duration::days(i64::from(offset));
        let key = date_key(date);
        points.push(DailyPoint {
            completed: history.get(&key).copied().unwrap_or_default(),
            label: date.format("%a").to_string(),
            date: key,
        });
    }
    points
}

pub fn habit_streak(habit: &Habit, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);
    while let Some(current) = day {
        if !habit.is_done_on(&date_key(current)) {
            break;
        }
        streak += 1;
        day = current.pred_opt();
    }
    streak
}

pub fn rolling_frequency(habit: &Habit, window_days: u32, today: NaiveDate) -> usize {
    let today = date_key(today);
    habit
        .completions
        .iter()
        .filter_map(|day| days_between(day, &today))
        .filter(|offset| (0..i64::from(window_days)).contains(offset))
        .count()
}

pub fn habit_summary(habit: &Habit, today: NaiveDate) -> HabitSummary {
    let recent = (0..WEEK_DAYS)
        .rev()
        .map(|offset| habit.is_done_on(&date_key(today - Duration::days(i64::from(offset)))))
        .collect();

    HabitSummary {
        id: habit.id.clone(),
        name: habit.name.clone(),
        description: habit.description.clone(),
        streak: habit_streak(habit, today),
        last_week: rolling_frequency(habit, WEEK_DAYS, today),
        done_today: habit.is_done_on(&date_key(today)),
        recent,
    }
}

pub fn build_stats(quests: &[Quest], habits: &[Habit]) -> StatsResponse {
    build_stats_at(today(), quests, habits)
}

pub fn build_stats_at(today: NaiveDate, quests: &[Quest], habits: &[Habit]) -> StatsResponse {
    let history = completion_history(quests);
    StatsResponse {
        today: date_key(today),
        quests: quest_stats(quests),
        last_7_days: daily_series(&history, today, WEEK_DAYS),
        habits: habits.iter().map(|habit| habit_summary(habit, today)).collect(),
    }
}
