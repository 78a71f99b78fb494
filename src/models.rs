use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_DIFFICULTY: u32 = 1;
pub const DEFAULT_XP: u64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl QuestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestStatus::Todo => "todo",
            QuestStatus::Doing => "doing",
            QuestStatus::Done => "done",
        }
    }

    /// Next board column; done is terminal.
    pub fn advanced(self) -> Self {
        match self {
            QuestStatus::Todo => QuestStatus::Doing,
            QuestStatus::Doing | QuestStatus::Done => QuestStatus::Done,
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "todo" => Ok(QuestStatus::Todo),
            "doing" => Ok(QuestStatus::Doing),
            "done" => Ok(QuestStatus::Done),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub category: String,
    pub due_date: Option<String>,
    pub difficulty: u32,
    pub xp: u64,
    pub status: QuestStatus,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Canonical day keys; ordered set keeps them unique and ascending.
    #[serde(default)]
    pub completions: BTreeSet<String>,
}

impl Habit {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            completions: BTreeSet::new(),
        }
    }

    /// Returns false when the day was already recorded.
    pub fn mark(&mut self, day_key: &str) -> bool {
        self.completions.insert(day_key.to_string())
    }

    pub fn is_done_on(&self, day_key: &str) -> bool {
        self.completions.contains(day_key)
    }
}

pub fn default_habits() -> Vec<Habit> {
    vec![
        Habit::new("habit-hydrate", "Hydrate", "Drink eight glasses of water"),
        Habit::new("habit-move", "Move", "Thirty minutes of exercise"),
        Habit::new("habit-read", "Read", "Read twenty pages"),
        Habit::new("habit-reflect", "Reflect", "Write a short journal entry"),
    ]
}

/// A form or JSON field that may arrive as a number or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawField::Number(value) => *value,
            RawField::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then(|| value.trunc())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub difficulty: Option<RawField>,
    #[serde(default)]
    pub xp: Option<RawField>,
    #[serde(default)]
    pub description: Option<String>,
}

/// HTML forms post every field as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub xp: String,
    #[serde(default)]
    pub description: String,
}

impl From<QuestForm> for QuestDraft {
    fn from(form: QuestForm) -> Self {
        Self {
            title: Some(form.title),
            category: Some(form.category),
            due_date: Some(form.due_date),
            difficulty: Some(RawField::Text(form.difficulty)),
            xp: Some(RawField::Text(form.xp)),
            description: Some(form.description),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl QuestDraft {
    /// Builds a todo quest, or `None` when the title is blank.
    pub fn normalize(&self, id: String) -> Option<Quest> {
        let title = non_blank(self.title.as_deref())?;

        let difficulty = self
            .difficulty
            .as_ref()
            .and_then(RawField::as_number)
            .filter(|value| *value >= 1.0 && *value <= f64::from(u32::MAX))
            .map(|value| value as u32)
            .unwrap_or(DEFAULT_DIFFICULTY);

        let xp = self
            .xp
            .as_ref()
            .and_then(RawField::as_number)
            .filter(|value| *value >= 0.0 && *value <= u64::MAX as f64)
            .map(|value| value as u64)
            .unwrap_or(DEFAULT_XP);

        Some(Quest {
            id,
            title,
            category: non_blank(self.category.as_deref())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            due_date: non_blank(self.due_date.as_deref()),
            difficulty,
            xp,
            status: QuestStatus::Todo,
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: QuestStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub total_xp: u64,
    pub level: u64,
    pub current_level_xp: u64,
    pub next_level_xp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub label: String,
    pub completed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub streak: u32,
    pub last_week: usize,
    pub done_today: bool,
    /// Last seven days, oldest first.
    pub recent: Vec<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub today: String,
    pub quests: QuestStats,
    pub last_7_days: Vec<DailyPoint>,
    pub habits: Vec<HabitSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> QuestDraft {
        QuestDraft {
            title: Some(title.to_string()),
            ..QuestDraft::default()
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(draft("   ").normalize("q1".into()).is_none());
        assert!(QuestDraft::default().normalize("q1".into()).is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let quest = draft("  Slay the dragon ").normalize("q1".into()).unwrap();
        assert_eq!(quest.title, "Slay the dragon");
        assert_eq!(quest.category, DEFAULT_CATEGORY);
        assert_eq!(quest.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(quest.xp, DEFAULT_XP);
        assert_eq!(quest.due_date, None);
        assert_eq!(quest.status, QuestStatus::Todo);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let mut input = draft("Quest");
        input.difficulty = Some(RawField::Number(0.0));
        input.xp = Some(RawField::Text("lots".into()));
        let quest = input.normalize("q1".into()).unwrap();
        assert_eq!(quest.difficulty, 1);
        assert_eq!(quest.xp, 25);

        input.difficulty = Some(RawField::Text("-2".into()));
        input.xp = Some(RawField::Number(-10.0));
        let quest = input.normalize("q1".into()).unwrap();
        assert_eq!(quest.difficulty, 1);
        assert_eq!(quest.xp, 25);
    }

    #[test]
    fn text_numbers_are_parsed() {
        let form = QuestForm {
            title: "Quest".into(),
            category: "Work".into(),
            due_date: " 2024-05-01 ".into(),
            difficulty: "3".into(),
            xp: "120.9".into(),
            description: String::new(),
        };
        let quest = QuestDraft::from(form).normalize("q1".into()).unwrap();
        assert_eq!(quest.category, "Work");
        assert_eq!(quest.due_date.as_deref(), Some("2024-05-01"));
        assert_eq!(quest.difficulty, 3);
        assert_eq!(quest.xp, 120);
    }

    #[test]
    fn zero_xp_is_kept() {
        let mut input = draft("Quest");
        input.xp = Some(RawField::Number(0.0));
        assert_eq!(input.normalize("q1".into()).unwrap().xp, 0);
    }

    #[test]
    fn json_draft_accepts_numbers_and_strings() {
        let input: QuestDraft = serde_json::from_str(
            r#"{"title":"Quest","difficulty":"4","xp":75,"dueDate":""}"#,
        )
        .unwrap();
        let quest = input.normalize("q1".into()).unwrap();
        assert_eq!(quest.difficulty, 4);
        assert_eq!(quest.xp, 75);
        assert_eq!(quest.due_date, None);
    }

    #[test]
    fn marking_a_habit_is_idempotent() {
        let mut habit = Habit::new("h", "Habit", "");
        assert!(habit.mark("2024-01-02"));
        assert!(habit.mark("2024-01-01"));
        assert!(!habit.mark("2024-01-02"));
        let days: Vec<_> = habit.completions.iter().cloned().collect();
        assert_eq!(days, vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn status_advances_and_parses() {
        assert_eq!(QuestStatus::Todo.advanced(), QuestStatus::Doing);
        assert_eq!(QuestStatus::Doing.advanced(), QuestStatus::Done);
        assert_eq!(QuestStatus::Done.advanced(), QuestStatus::Done);
        assert_eq!("doing".parse::<QuestStatus>(), Ok(QuestStatus::Doing));
        assert!("later".parse::<QuestStatus>().is_err());
    }

    #[test]
    fn quest_serializes_with_camel_case() {
        let quest = draft("Quest").normalize("q1".into()).unwrap();
        let value = serde_json::to_value(&quest).unwrap();
        assert_eq!(value["dueDate"], serde_json::Value::Null);
        assert_eq!(value["status"], "todo");
    }
}
