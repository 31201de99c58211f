use itertools::Itertools;
use std::fmt::{self, Display};
use termion::color::{self, AnsiValue};

use super::{CellStyle, Theme};
use crate::calendar::{Day, YearGrid, GRID_COLUMNS};
use crate::config::Locale;
use crate::holiday::Holidays;

pub struct DayCell<'a> {
    day: Option<&'a Day>,
    focused: bool,
    colored: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    const CELL_WIDTH: usize = 3;

    fn new(day: Option<&'a Day>, theme: &'a Theme) -> Self {
        DayCell {
            day,
            focused: false,
            colored: true,
            theme,
        }
    }

    fn focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn text(&self) -> String {
        match self.day {
            Some(day) if !self.colored && day.is_selected() => format!("*{}", day.day_num()),
            Some(day) => day.day_num().to_string(),
            None => String::new(),
        }
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:>width$}", self.text(), width = Self::CELL_WIDTH);

        if !self.colored {
            return write!(f, "{}", text);
        }

        let (fg, bg) = match self.day {
            Some(day) => self.theme.colors(CellStyle::from(day)),
            None => (None, None),
        };
        let bg = if self.focused {
            Some(self.theme.cursor_bg)
        } else {
            bg
        };

        write_colored(f, &text, fg, bg)
    }
}

fn write_colored(
    f: &mut fmt::Formatter<'_>,
    text: &str,
    fg: Option<AnsiValue>,
    bg: Option<AnsiValue>,
) -> fmt::Result {
    if let Some(fg) = fg {
        write!(f, "{}", color::Fg(fg))?;
    }
    if let Some(bg) = bg {
        write!(f, "{}", color::Bg(bg))?;
    }
    write!(f, "{}", text)?;
    if fg.is_some() || bg.is_some() {
        write!(f, "{}{}", color::Fg(color::Reset), color::Bg(color::Reset))?;
    }

    Ok(())
}

/// Text rendering of a whole year: a header of weekday labels followed by
/// one line per month.
pub struct YearView<'a> {
    grid: &'a YearGrid,
    locale: &'a Locale,
    theme: &'a Theme,
    cursor: Option<(usize, usize)>,
    colored: bool,
}

impl<'a> YearView<'a> {
    pub fn new(grid: &'a YearGrid, locale: &'a Locale, theme: &'a Theme) -> Self {
        YearView {
            grid,
            locale,
            theme,
            cursor: None,
            colored: true,
        }
    }

    pub fn cursor(mut self, month0: usize, column: usize) -> Self {
        self.cursor = Some((month0, column));
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn label_width(&self) -> usize {
        self.locale
            .month_names
            .iter()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Display for YearView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.label_width();
        let header_fg = if self.colored {
            Some(self.theme.header_fg)
        } else {
            None
        };

        let title = format!("{} {}", self.locale.title, self.grid.year());
        write_colored(f, &title, header_fg, None)?;
        writeln!(f)?;

        let labels = (0..GRID_COLUMNS)
            .map(|column| {
                format!(
                    "{:>width$}",
                    self.locale.weekday_label(column),
                    width = DayCell::CELL_WIDTH
                )
            })
            .join("");
        write!(f, "{:width$}", "", width = label_width)?;
        write_colored(f, &labels, header_fg, None)?;
        writeln!(f)?;

        for month in self.grid.months() {
            write!(f, "{:<width$}", month.name(), width = label_width)?;

            for (column, day) in month.cells().enumerate() {
                let focused = self.cursor == Some((month.index() as usize, column));
                write!(
                    f,
                    "{}",
                    DayCell::new(day, self.theme)
                        .focus(focused)
                        .colored(self.colored)
                )?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Holidays of the year ordered by date, one per line.
pub struct HolidayLegend<'a>(pub &'a Holidays);

impl Display for HolidayLegend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for holiday in self
            .0
            .iter()
            .sorted_by_key(|h| (h.date.month0, h.date.day))
        {
            writeln!(f, "{} {}", holiday.date, holiday.name)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::HolidayTable;

    fn grid(year: i32) -> YearGrid {
        YearGrid::generate(year, &Locale::default(), &HolidayTable::default()).unwrap()
    }

    #[test]
    fn plain_rendering_layout() {
        let grid = grid(2024).toggle_day(0, 3);
        let locale = Locale::default();
        let theme = Theme::default();
        let text = YearView::new(&grid, &locale, &theme)
            .colored(false)
            .to_string();
        let lines: Vec<&str> = text.lines().collect();

        // title, header, 12 months
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "Kalendarz 2024");
        assert!(lines[1].trim_start().starts_with("Nd Pn Wt Śr"));

        let january = lines[2];
        assert!(january.starts_with("Styczeń "));
        // 12 wide label, blank Sunday, then Monday the 1st
        let first_cells: String = january.chars().skip(12).take(6).collect();
        assert_eq!(first_cells, "     1");
        assert!(january.contains(" *3"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn colored_rendering_uses_escapes() {
        let grid = grid(2024);
        let locale = Locale::default();
        let theme = Theme::default();
        let text = YearView::new(&grid, &locale, &theme).cursor(0, 1).to_string();

        assert!(text.contains(&color::Bg(theme.cursor_bg).to_string()));
        assert!(text.contains(&color::Bg(theme.saturday_bg).to_string()));
    }

    #[test]
    fn legend_sorted() {
        let holidays = HolidayTable::default().holidays(2024).unwrap();
        let legend = HolidayLegend(&holidays).to_string();
        let lines: Vec<&str> = legend.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "01.01 Nowy Rok");
        assert_eq!(lines[2], "31.03 Wielkanoc");
        assert_eq!(lines[3], "01.04 Poniedziałek Wielkanocny");
        assert_eq!(lines[11], "26.12 Drugi dzień Bożego Narodzenia");
    }
}
