//! Interactive filter selection
//!
//! Asks for a city, a filter axis, and then a month or a weekday, re-asking
//! until each answer is valid. The result always names a catalog city, a
//! month in January to June (or all) and a weekday (or all).

use crate::prompt::Prompter;
use bikeshare_core::catalog::CityCatalog;
use bikeshare_core::error::Result;
use bikeshare_core::types::{
    FilterAxis, Selection, parse_admitted_month, parse_weekday, weekday_name,
};
use chrono::{Month, Weekday};
use std::io::{BufRead, Write};
use tracing::debug;

const ALL: &str = "all";

/// Parse a month answer: `Some(None)` for `all`, `Some(Some(month))` for an
/// admitted month, `None` otherwise
pub fn parse_month_choice(input: &str) -> Option<Option<Month>> {
    if input.trim().eq_ignore_ascii_case(ALL) {
        return Some(None);
    }
    parse_admitted_month(input).map(Some)
}

/// Parse a weekday answer: `Some(None)` for `all`, `Some(Some(day))` for a
/// weekday name, `None` otherwise
pub fn parse_day_choice(input: &str) -> Option<Option<Weekday>> {
    if input.trim().eq_ignore_ascii_case(ALL) {
        return Some(None);
    }
    parse_weekday(input).map(Some)
}

/// Run the selection dialogue
///
/// # Errors
///
/// Only terminal failures and a closed input escape; invalid answers are
/// re-asked.
pub fn select_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    catalog: &CityCatalog,
) -> Result<Selection> {
    prompter.say("Hello! Let's explore some US bikeshare data!")?;

    let city = prompter.prompt_until_valid(
        &format!(
            "Please select one city to evaluate: {}: ",
            catalog.display_list()
        ),
        "Please enter your selection exactly.",
        |answer| catalog.lookup(answer).map(|entry| entry.name.clone()),
    )?;
    prompter.say(&format!("Thank you for selecting: {city}"))?;

    let axis = prompter.prompt_until_valid(
        "Would you like to filter by month, day or neither (neither shows the full dataset)? ",
        "Please select month, day or neither.",
        FilterAxis::parse,
    )?;
    prompter.say(&format!("Thank you for filtering by {axis}"))?;

    let selection = match axis {
        FilterAxis::Month => {
            let month = prompter.prompt_until_valid(
                "Please select one month between January through June or type all to see data for all months: ",
                "Please enter one of these months: January, February, March, April, May, June or type All.",
                parse_month_choice,
            )?;
            match month {
                Some(month) => prompter.say(&format!(
                    "Thank you for selecting: {}",
                    month.name().to_lowercase()
                ))?,
                None => prompter.say("Thank you for selecting all months.")?,
            }
            Selection::by_month(city, month)
        }
        FilterAxis::Day => {
            let day = prompter.prompt_until_valid(
                "Please select a day of the week by name or type all to see data for all days of the week: ",
                "Please enter a day of the week or type All.",
                parse_day_choice,
            )?;
            match day {
                Some(day) => prompter.say(&format!(
                    "Thank you for selecting: {}",
                    weekday_name(day).to_lowercase()
                ))?,
                None => prompter.say("Thank you for selecting all days.")?,
            }
            Selection::by_day(city, day)
        }
        FilterAxis::Neither => Selection::unfiltered(city),
    };

    prompter.say(&"-".repeat(40))?;
    debug!("Filter selection: {selection}");
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::error::BikeshareError;
    use bikeshare_core::types::CityName;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<Selection>, String) {
        let catalog = CityCatalog::new("data");
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = select_filters(&mut prompter, &catalog);
        let output = String::from_utf8(prompter.into_inner().1).unwrap();
        (result, output)
    }

    #[test]
    fn test_parse_month_choice() {
        assert_eq!(parse_month_choice("ALL"), Some(None));
        assert_eq!(parse_month_choice("march"), Some(Some(Month::March)));
        assert_eq!(parse_month_choice("december"), None);
        assert_eq!(parse_month_choice(""), None);
    }

    #[test]
    fn test_parse_day_choice() {
        assert_eq!(parse_day_choice("all"), Some(None));
        assert_eq!(parse_day_choice("Saturday"), Some(Some(Weekday::Sat)));
        assert_eq!(parse_day_choice("funday"), None);
    }

    #[test]
    fn test_select_month() {
        let (result, output) = run("Chicago\nmonth\njanuary\n");
        let selection = result.unwrap();

        assert_eq!(selection.city(), &CityName::new("chicago"));
        assert_eq!(selection.axis(), FilterAxis::Month);
        assert_eq!(selection.month(), Some(Month::January));
        assert_eq!(selection.day(), None);
        assert!(output.contains("Thank you for selecting: chicago"));
        assert!(output.contains("Thank you for selecting: january"));
    }

    #[test]
    fn test_select_day_all() {
        let (result, output) = run("washington\nday\nAll\n");
        let selection = result.unwrap();

        assert_eq!(selection.axis(), FilterAxis::Day);
        assert_eq!(selection.day(), None);
        assert_eq!(selection.month(), None);
        assert!(output.contains("Thank you for selecting all days."));
    }

    #[test]
    fn test_select_neither() {
        let (result, _) = run("new york city\nNEITHER\n");
        let selection = result.unwrap();

        assert_eq!(selection.city(), &CityName::new("new york city"));
        assert_eq!(selection.axis(), FilterAxis::Neither);
        assert_eq!(selection.month(), None);
        assert_eq!(selection.day(), None);
    }

    #[test]
    fn test_invalid_answers_are_reasked() {
        let (result, output) = run("boston\nchicago\nweek\nmonth\njuly\nfebruary\n");
        let selection = result.unwrap();

        assert_eq!(selection.month(), Some(Month::February));
        assert_eq!(output.matches("Please enter your selection exactly.").count(), 1);
        assert_eq!(output.matches("Please select month, day or neither.").count(), 1);
        assert_eq!(output.matches("Please enter one of these months").count(), 1);
    }

    #[test]
    fn test_closed_input() {
        let (result, _) = run("chicago\n");
        assert!(matches!(result, Err(BikeshareError::InputClosed)));
    }
}
