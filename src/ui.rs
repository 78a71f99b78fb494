use crate::dates::{format_for_display, is_same_day};
use crate::models::{DailyPoint, HabitSummary, Quest, QuestStatus, StatsResponse};

pub fn render_index(quests: &[Quest], stats: &StatsResponse) -> String {
    let progress = stats.quests.current_level_xp * 100 / stats.quests.next_level_xp.max(1);
    INDEX_HTML
        .replace("{{TODAY}}", &escape(&stats.today))
        .replace("{{LEVEL}}", &stats.quests.level.to_string())
        .replace("{{LEVEL_XP}}", &stats.quests.current_level_xp.to_string())
        .replace("{{NEXT_XP}}", &stats.quests.next_level_xp.to_string())
        .replace("{{PROGRESS}}", &progress.to_string())
        .replace("{{TOTAL_XP}}", &stats.quests.total_xp.to_string())
        .replace("{{ACTIVE}}", &stats.quests.active.to_string())
        .replace("{{COMPLETED}}", &stats.quests.completed.to_string())
        .replace("{{TODO}}", &render_column(quests, QuestStatus::Todo, &stats.today))
        .replace("{{DOING}}", &render_column(quests, QuestStatus::Doing, &stats.today))
        .replace("{{DONE}}", &render_column(quests, QuestStatus::Done, &stats.today))
        .replace("{{HABITS}}", &render_habits(&stats.habits))
        .replace("{{HISTORY}}", &render_history(&stats.last_7_days))
}

fn render_column(quests: &[Quest], status: QuestStatus, today: &str) -> String {
    let mut html = String::new();
    for quest in quests.iter().filter(|quest| quest.status == status) {
        let due_today = quest
            .due_date
            .as_deref()
            .is_some_and(|due| is_same_day(due, today));
        let action = match status {
            QuestStatus::Todo => "Start",
            QuestStatus::Doing => "Complete",
            QuestStatus::Done => "",
        };
        let id = escape(&quest.id);

        html.push_str(&format!(
            r#"<article class="card{due_class}">
  <header><span class="category">{category}</span><span class="xp">{xp} XP</span></header>
  <h3>{title}</h3>
  <p class="meta">Difficulty {difficulty} &middot; {due}</p>"#,
            due_class = if due_today { " due-today" } else { "" },
            category = escape(&quest.category),
            xp = quest.xp,
            title = escape(&quest.title),
            difficulty = quest.difficulty,
            due = escape(&format_for_display(quest.due_date.as_deref())),
        ));
        if !quest.description.is_empty() {
            html.push_str(&format!(r#"<p class="desc">{}</p>"#, escape(&quest.description)));
        }
        html.push_str(r#"<div class="card-actions">"#);
        if !action.is_empty() {
            html.push_str(&format!(
                r#"<form method="post" action="/quests/{id}/advance"><button type="submit">{action}</button></form>"#
            ));
        }
        html.push_str(&format!(
            r#"<form method="post" action="/quests/{id}/delete"><button class="ghost" type="submit">Delete</button></form></div></article>"#
        ));
    }
    if html.is_empty() {
        html.push_str(r#"<p class="empty">Nothing here yet.</p>"#);
    }
    html
}

fn render_habits(habits: &[HabitSummary]) -> String {
    let mut html = String::new();
    for habit in habits {
        let cells: String = habit
            .recent
            .iter()
            .map(|done| {
                if *done {
                    r#"<span class="cell on"></span>"#
                } else {
                    r#"<span class="cell"></span>"#
                }
            })
            .collect();
        let button = if habit.done_today {
            r#"<button type="submit" disabled>Done today</button>"#
        } else {
            r#"<button type="submit">Check in</button>"#
        };
        html.push_str(&format!(
            r#"<article class="habit">
  <h3>{name}</h3>
  <p class="desc">{description}</p>
  <div class="cells">{cells}</div>
  <p class="meta">Streak {streak} &middot; {last_week}/7 this week</p>
  <form method="post" action="/habits/{id}/check">{button}</form>
</article>"#,
            name = escape(&habit.name),
            description = escape(&habit.description),
            streak = habit.streak,
            last_week = habit.last_week,
            id = escape(&habit.id),
        ));
    }
    html
}

/// Plain list the chart script replaces when SVG is available.
fn render_history(points: &[DailyPoint]) -> String {
    let mut html = String::from(r#"<ol class="history">"#);
    for point in points {
        html.push_str(&format!(
            r#"<li><span>{label} {date}</span><strong>{count}</strong></li>"#,
            label = escape(&point.label),
            date = escape(&point.date),
            count = point.completed,
        ));
    }
    html.push_str("</ol>");
    html
}

/// Braces are encoded too so user text never matches a template placeholder.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            other => out.push(other),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Quest Log</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --muted: #6f6a65;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 18px 40px rgba(47, 72, 88, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 28px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1, h2, h3 {
      margin: 0;
    }

    .panel {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 22px;
      display: grid;
      gap: 14px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 12px;
    }

    .stat .label {
      display: block;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: #e6e0d6;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .board {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 16px;
    }

    .column {
      display: grid;
      gap: 10px;
      align-content: start;
    }

    .card, .habit {
      border: 1px solid #e6e0d6;
      border-radius: 14px;
      padding: 12px;
      display: grid;
      gap: 6px;
      background: #fff;
    }

    .card.due-today {
      border-color: var(--accent);
    }

    .card header {
      display: flex;
      justify-content: space-between;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .meta, .desc, .empty {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .card-actions {
      display: flex;
      gap: 8px;
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 8px 14px;
      background: var(--accent-2);
      color: #fff;
      cursor: pointer;
    }

    button.ghost {
      background: transparent;
      color: var(--muted);
      border: 1px solid #d8d1c6;
    }

    button:disabled {
      opacity: 0.5;
      cursor: default;
    }

    .quest-form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 10px;
    }

    input, textarea {
      border: 1px solid #d8d1c6;
      border-radius: 10px;
      padding: 8px 10px;
      font: inherit;
    }

    .habits {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 12px;
    }

    .cells {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }

    .cell {
      height: 14px;
      border-radius: 4px;
      background: #e6e0d6;
    }

    .cell.on {
      background: #2d7a4b;
    }

    .history {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
      text-align: center;
    }

    .history li {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .chart-bar {
      fill: var(--accent-2);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 12px;
    }

    @media (max-width: 760px) {
      .board {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Quest Log</h1>
      <p class="meta">Today is {{TODAY}}.</p>
    </header>

    <section class="panel">
      <div class="stats">
        <div class="stat"><span class="label">Level</span><span class="value">{{LEVEL}}</span></div>
        <div class="stat"><span class="label">Total XP</span><span class="value">{{TOTAL_XP}}</span></div>
        <div class="stat"><span class="label">Active quests</span><span class="value">{{ACTIVE}}</span></div>
        <div class="stat"><span class="label">Completed</span><span class="value">{{COMPLETED}}</span></div>
      </div>
      <div class="bar" title="{{LEVEL_XP}} / {{NEXT_XP}} XP"><span style="width: {{PROGRESS}}%"></span></div>
      <p class="meta">{{LEVEL_XP}} / {{NEXT_XP}} XP to the next level</p>
    </section>

    <section class="panel">
      <h2>New quest</h2>
      <form class="quest-form" method="post" action="/quests">
        <input name="title" placeholder="Title" required />
        <input name="category" placeholder="Category" />
        <input name="due_date" type="date" />
        <input name="difficulty" type="number" min="1" placeholder="Difficulty" />
        <input name="xp" type="number" min="0" placeholder="XP" />
        <textarea name="description" placeholder="Description"></textarea>
        <button type="submit">Add quest</button>
      </form>
    </section>

    <section class="panel">
      <h2>Board</h2>
      <div class="board">
        <div class="column"><h3>To do</h3>{{TODO}}</div>
        <div class="column"><h3>Doing</h3>{{DOING}}</div>
        <div class="column"><h3>Done</h3>{{DONE}}</div>
      </div>
    </section>

    <section class="panel">
      <h2>Habits</h2>
      <div class="habits">{{HABITS}}</div>
    </section>

    <section class="panel">
      <h2>Completed by due date, last 7 days</h2>
      <div id="chart">{{HISTORY}}</div>
    </section>
  </main>

  <script>
    const chartEl = document.getElementById('chart');

    const renderBars = (points) => {
      const width = 600;
      const height = 200;
      const padding = 28;
      const max = Math.max(1, ...points.map((point) => point.completed));
      const slot = (width - padding * 2) / points.length;
      const barWidth = slot * 0.6;
      const scale = (height - padding * 2) / max;

      const bars = points
        .map((point, index) => {
          const x = padding + index * slot + (slot - barWidth) / 2;
          const h = point.completed * scale;
          const y = height - padding - h;
          return `<rect class="chart-bar" x="${x}" y="${y}" width="${barWidth}" height="${h}" rx="4" />` +
            `<text class="chart-label" x="${x + barWidth / 2}" y="${height - 8}" text-anchor="middle">${point.label}</text>` +
            `<text class="chart-label" x="${x + barWidth / 2}" y="${y - 6}" text-anchor="middle">${point.completed}</text>`;
        })
        .join('');

      chartEl.innerHTML = `<svg viewBox="0 0 ${width} ${height}" role="img" aria-label="Completed quests chart">${bars}</svg>`;
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      const stats = await res.json();
      renderBars(stats.last7Days);
    };

    if (typeof document.createElementNS === 'function') {
      loadStats().catch(() => {});
    }
  </script>
</body>
</html>
"#;
