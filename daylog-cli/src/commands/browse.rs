use anyhow::Result;
use daylog_core::{App, CalendarView, DateKey};
use dialoguer::Input;
use owo_colors::OwoColorize;

use crate::commands::show::print_month;
use crate::render::Render;
use crate::utils::date_arg::{parse_date, parse_duration};

const HELP: &str = "\
  n            next month
  p            previous month
  t            jump to today
  s <day>      select a day (number in this month, or a date)
  a <text>     add an activity to the selected day
  d <number>   delete an activity from the selected day
  q            quit";

/// One line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Next,
    Prev,
    Today,
    Select(String),
    Add(String),
    Delete(usize),
    Help,
    Quit,
}

fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match (cmd, rest) {
        ("n", "") => Some(Action::Next),
        ("p", "") => Some(Action::Prev),
        ("t", "") => Some(Action::Today),
        ("s", day) if !day.is_empty() => Some(Action::Select(day.to_string())),
        ("a", text) if !text.is_empty() => Some(Action::Add(text.to_string())),
        ("d", n) => n.parse().ok().filter(|n| *n > 0).map(Action::Delete),
        ("?" | "h" | "help", "") => Some(Action::Help),
        ("q" | "quit", "") => Some(Action::Quit),
        _ => None,
    }
}

/// A bare day number picks that day of the visible month.
fn resolve_day(app: &App, input: &str) -> Result<DateKey> {
    if let Ok(day) = input.parse::<u32>() {
        let view = app.view();
        return DateKey::from_ymd(view.visible_year, view.visible_month, day).ok_or_else(|| {
            anyhow::anyhow!("{} has no day {}", view.title(), day)
        });
    }
    parse_date(input)
}

pub fn run(app: &mut App) -> Result<()> {
    print_month(app)?;
    println!("{}", "Type ? for help".dimmed());

    loop {
        let line: String = Input::new()
            .with_prompt("daylog")
            .allow_empty(true)
            .interact_text()?;

        let Some(action) = parse_action(&line) else {
            if !line.trim().is_empty() {
                eprintln!("  {}", format!("Unknown command: {}", line.trim()).red());
            }
            continue;
        };

        if action == Action::Quit {
            return Ok(());
        }

        if let Err(e) = apply(app, action) {
            eprintln!("  {}", e.to_string().red());
        }
    }
}

fn apply(app: &mut App, action: Action) -> Result<()> {
    match action {
        Action::Next => app.next_month()?,
        Action::Prev => app.prev_month()?,
        Action::Today => {
            let today = app.today();
            app.set_view(CalendarView::current(today).select_date(today));
        }
        Action::Select(day) => {
            let date = resolve_day(app, &day)?;
            app.select(date);
        }
        Action::Add(text) => {
            let date = selected(app)?;
            let how_long: String = Input::new()
                .with_prompt("  How long? (skip)")
                .allow_empty(true)
                .interact_text()?;
            let (hours, minutes) = if how_long.trim().is_empty() {
                (0, 0)
            } else {
                parse_duration(&how_long)?
            };
            println!("  {}", app.add(date, &text, hours, minutes)?.render());
        }
        Action::Delete(n) => {
            let date = selected(app)?;
            println!("  {}", app.delete_displayed(&date, n - 1)?.render());
        }
        Action::Help | Action::Quit => {
            println!("{}", HELP);
            return Ok(());
        }
    }

    println!();
    print_month(app)
}

fn selected(app: &App) -> Result<DateKey> {
    app.view()
        .selected
        .ok_or_else(|| anyhow::anyhow!("Select a day first (s <day>)"))
}
