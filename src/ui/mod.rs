pub mod app;
pub mod context;
pub mod year_view;

pub use app::App;
pub use context::Theme;
pub use year_view::{HolidayLegend, YearView};

use itertools::Itertools;

use crate::calendar::{Day, WeekdayClass};
use crate::error::{Error, ErrorKind, Result};

pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;

/// Parses user input into a year the front end is willing to show.
pub fn validate_year(input: &str) -> Result<i32> {
    let input = input.trim();

    if input.len() != 4 || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::new(
            ErrorKind::YearNotAllowed,
            &format!("'{}' is not a four digit year", input),
        ));
    }

    let year: i32 = input
        .parse()
        .map_err(|_| Error::new(ErrorKind::YearNotAllowed, input))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::new(
            ErrorKind::YearNotAllowed,
            &format!("{} is not within {}..{}", year, MIN_YEAR, MAX_YEAR),
        ));
    }

    Ok(year)
}

/// Terminals in raw mode do not return the carriage on `\n`; every line
/// break has to be `\r\n`.
pub fn raw_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .join("\r\n")
}

/// How a day cell is painted. Selection wins over everything, Saturdays are
/// muted, Sundays and holidays share the festive colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    Saturday,
    Festive,
    Selected,
}

impl From<&Day> for CellStyle {
    fn from(day: &Day) -> Self {
        if day.is_selected() {
            return CellStyle::Selected;
        }

        match day.class() {
            WeekdayClass::Saturday => CellStyle::Saturday,
            WeekdayClass::Sunday => CellStyle::Festive,
            WeekdayClass::Weekday if day.is_holiday() => CellStyle::Festive,
            WeekdayClass::Weekday => CellStyle::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearGrid;
    use crate::config::Locale;
    use crate::holiday::HolidayTable;

    #[test]
    fn year_input() {
        assert_eq!(validate_year("2024").unwrap(), 2024);
        assert_eq!(validate_year(" 1000 ").unwrap(), 1000);
        assert_eq!(validate_year("9999").unwrap(), 9999);

        for bad in ["999", "0999", "10000", "20a4", "", "-200"] {
            let err = validate_year(bad).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::YearNotAllowed), "{}", bad);
        }
    }

    #[test]
    fn raw_line_breaks() {
        assert_eq!(raw_lines("a\nb\n"), "a\r\nb\r\n");
        assert_eq!(raw_lines("a\r\nb"), "a\r\nb");
        assert_eq!(raw_lines("single"), "single");
    }

    #[test]
    fn cell_styles() {
        let grid = YearGrid::generate(2024, &Locale::default(), &HolidayTable::default()).unwrap();
        let style = |col| CellStyle::from(grid.day_at(0, col).unwrap());

        // January 2024: 1st Monday and New Year, 2nd plain, 6th Saturday, 7th Sunday
        assert_eq!(style(1), CellStyle::Festive);
        assert_eq!(style(2), CellStyle::Plain);
        assert_eq!(style(6), CellStyle::Saturday);
        assert_eq!(style(7), CellStyle::Festive);

        let grid = grid.toggle_day(0, 6);
        assert_eq!(CellStyle::from(grid.day_at(0, 6).unwrap()), CellStyle::Selected);
    }
}
