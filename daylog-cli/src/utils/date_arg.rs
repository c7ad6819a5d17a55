//! Parsing of user-typed dates, months and durations.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use daylog_core::{CalendarView, DateKey};

/// Parse `YYYY-MM-DD`, or natural language such as "today", "fri", "march 20".
pub fn parse_date(input: &str) -> Result<DateKey> {
    let input = input.trim();
    if let Ok(key) = input.parse::<DateKey>() {
        return Ok(key);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(DateKey::new(dt.date()))
}

/// Parse `YYYY-MM` into a view of that month.
pub fn parse_month(input: &str) -> Result<CalendarView> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", input))?;
    Ok(CalendarView::new(date.year(), date.month())?)
}

/// Parse a duration such as "1h 30m" or "45min" into whole hours and minutes.
pub fn parse_duration(input: &str) -> Result<(u32, u32)> {
    let duration = humantime::parse_duration(input.trim())
        .map_err(|e| anyhow::anyhow!("Could not parse duration \"{}\": {}", input, e))?;
    let minutes = u32::try_from(duration.as_secs() / 60).context("Duration too large")?;
    Ok((minutes / 60, minutes % 60))
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_parse_directly() {
        assert_eq!(parse_date("2024-03-15").unwrap().to_string(), "2024-03-15");
        assert_eq!(parse_date(" 2024-03-15 ").unwrap().to_string(), "2024-03-15");
    }

    #[test]
    fn month_argument() {
        let view = parse_month("2024-03").unwrap();
        assert_eq!((view.visible_year, view.visible_month), (2024, 3));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("march").is_err());
    }

    #[test]
    fn durations_split_into_hours_and_minutes() {
        assert_eq!(parse_duration("1h 30m").unwrap(), (1, 30));
        assert_eq!(parse_duration("45min").unwrap(), (0, 45));
        assert_eq!(parse_duration("150m").unwrap(), (2, 30));
        assert!(parse_duration("a while").is_err());
    }

    #[test]
    fn expand_day_abbreviations() {
        assert_eq!(expand_abbreviations("sat"), "saturday");
        assert_eq!(expand_abbreviations("last fri"), "last friday");
        assert_eq!(expand_abbreviations("Mar 20"), "march 20");
        assert_eq!(expand_abbreviations("today"), "today");
    }
}
