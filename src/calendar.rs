use chrono::{Datelike, NaiveDate, Weekday};
use log;
use std::fmt;

use crate::config::Locale;
use crate::error::{Error, Result};
use crate::holiday::{HolidayTable, Holidays};

/// Width of the weekly grid. A month starting on the last weekday column
/// (offset 6) with 31 days fills it exactly.
pub const GRID_COLUMNS: usize = 37;

pub const MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayClass {
    Weekday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    day_num: u32,
    class: WeekdayClass,
    holiday: bool,
    selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRow {
    index: u32,
    name: String,
    offset: u32,
    days: Vec<Day>,
}

/// All twelve months of one year, laid out for a fixed-width weekly grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGrid {
    year: i32,
    months: Vec<MonthRow>,
}

/// Number of days of the zero-based month `month0`, i.e. the day before the
/// first of the following month.
pub fn days_of_month(month0: u32, year: i32) -> Result<u32> {
    let last = if month0 == MONTHS - 1 {
        NaiveDate::from_ymd_opt(year, 12, 31)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1).and_then(|first| first.pred_opt())
    };

    last.map(|date| date.day())
        .ok_or_else(|| Error::year_out_of_range(year))
}

impl From<Weekday> for WeekdayClass {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat => WeekdayClass::Saturday,
            Weekday::Sun => WeekdayClass::Sunday,
            _ => WeekdayClass::Weekday,
        }
    }
}

impl Day {
    fn new(date: NaiveDate, holidays: &Holidays) -> Self {
        let class = WeekdayClass::from(date.weekday());

        // Weekends never count as holidays, whatever the table says
        let holiday =
            class == WeekdayClass::Weekday && holidays.contains(date.day(), date.month0());

        Day {
            day_num: date.day(),
            class,
            holiday,
            selected: false,
        }
    }

    pub fn day_num(&self) -> u32 {
        self.day_num
    }

    pub fn class(&self) -> WeekdayClass {
        self.class
    }

    pub fn is_holiday(&self) -> bool {
        self.holiday
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_weekend(&self) -> bool {
        self.class != WeekdayClass::Weekday
    }

    fn toggle(&mut self) {
        self.selected = !self.selected;
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.day_num)
    }
}

impl MonthRow {
    fn generate(year: i32, month0: u32, name: &str, holidays: &Holidays) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
            .ok_or_else(|| Error::year_out_of_range(year))?;
        let num_days = days_of_month(month0, year)?;

        let days = first
            .iter_days()
            .take(num_days as usize)
            .map(|date| Day::new(date, holidays))
            .collect();

        Ok(MonthRow {
            index: month0,
            name: name.to_owned(),
            offset: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column of the first day, 0 being Sunday.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, day_num: u32) -> Option<&Day> {
        let idx = day_num.checked_sub(1)?;
        self.days.get(idx as usize)
    }

    /// Day shown in grid column `column`, `None` for padding cells.
    pub fn day_at(&self, column: usize) -> Option<&Day> {
        let idx = column.checked_sub(self.offset as usize)?;
        self.days.get(idx)
    }

    fn day_at_mut(&mut self, column: usize) -> Option<&mut Day> {
        let idx = column.checked_sub(self.offset as usize)?;
        self.days.get_mut(idx)
    }

    /// One entry per grid column.
    pub fn cells(&self) -> impl Iterator<Item = Option<&Day>> + '_ {
        (0..GRID_COLUMNS).map(move |column| self.day_at(column))
    }
}

impl YearGrid {
    pub fn generate(year: i32, locale: &Locale, table: &HolidayTable) -> Result<Self> {
        let holidays = table.holidays(year)?;

        let months = (0..MONTHS)
            .map(|month0| MonthRow::generate(year, month0, locale.month_name(month0), &holidays))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "generated grid for {} with {} days",
            year,
            months.iter().map(|m| m.days.len()).sum::<usize>()
        );

        Ok(YearGrid { year, months })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> &[MonthRow] {
        &self.months
    }

    pub fn month(&self, month0: usize) -> Option<&MonthRow> {
        self.months.get(month0)
    }

    pub fn day_at(&self, month0: usize, column: usize) -> Option<&Day> {
        self.months.get(month0)?.day_at(column)
    }

    /// Returns a copy of the grid with the day at (`month0`, `column`)
    /// flipped. Padding cells and unknown months leave the copy unchanged.
    pub fn toggle_day(&self, month0: usize, column: usize) -> YearGrid {
        let mut grid = self.clone();

        if let Some(day) = grid
            .months
            .get_mut(month0)
            .and_then(|month| month.day_at_mut(column))
        {
            day.toggle();
            log::debug!(
                "day {}.{:02}.{} selected: {}",
                day.day_num,
                month0 + 1,
                self.year,
                day.selected
            );
        }

        grid
    }

    pub fn selected_days(&self) -> impl Iterator<Item = (u32, &Day)> + '_ {
        self.months.iter().flat_map(|month| {
            month
                .days
                .iter()
                .filter(|day| day.selected)
                .map(move |day| (month.index, day))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(year: i32) -> YearGrid {
        YearGrid::generate(year, &Locale::default(), &HolidayTable::default()).unwrap()
    }

    #[test]
    fn twelve_months_in_order() {
        let g = grid(2024);
        assert_eq!(g.months().len(), 12);
        for (idx, month) in g.months().iter().enumerate() {
            assert_eq!(month.index() as usize, idx);
        }
        assert_eq!(g.months()[0].name(), "Styczeń");
        assert_eq!(g.months()[11].name(), "Grudzień");
    }

    #[test]
    fn january_2024() {
        let g = grid(2024);
        let jan = g.month(0).unwrap();

        assert_eq!(jan.offset(), 1);
        assert_eq!(jan.days().len(), 31);
        assert_eq!(g.day_at(0, 1).map(Day::day_num), Some(1));
        assert!(g.day_at(0, 0).is_none());
    }

    #[test]
    fn february_length() {
        assert_eq!(grid(2024).month(1).unwrap().days().len(), 29);
        assert_eq!(grid(2023).month(1).unwrap().days().len(), 28);
        assert_eq!(grid(1900).month(1).unwrap().days().len(), 28);
        assert_eq!(grid(2000).month(1).unwrap().days().len(), 29);
    }

    #[test]
    fn days_of_month_december() {
        assert_eq!(days_of_month(11, 2023).unwrap(), 31);
        assert_eq!(days_of_month(3, 2023).unwrap(), 30);
    }

    #[test]
    fn widest_month_fits_grid() {
        // July 1st 2023 is a Saturday
        let g = grid(2023);
        let july = g.month(6).unwrap();

        assert_eq!(july.offset(), 6);
        assert_eq!(july.offset() as usize + july.days().len(), GRID_COLUMNS);
        assert_eq!(g.day_at(6, GRID_COLUMNS - 1).map(Day::day_num), Some(31));
        assert_eq!(july.cells().count(), GRID_COLUMNS);
    }

    #[test]
    fn classification() {
        let g = grid(2024);
        let jan = g.month(0).unwrap();

        // 2024-01-01 Monday, New Year
        assert_eq!(jan.day(1).unwrap().class(), WeekdayClass::Weekday);
        assert!(jan.day(1).unwrap().is_holiday());
        assert_eq!(jan.day(6).unwrap().class(), WeekdayClass::Saturday);
        assert_eq!(jan.day(7).unwrap().class(), WeekdayClass::Sunday);
        assert!(!jan.day(2).unwrap().is_holiday());

        // Easter Monday 2024-04-01, Corpus Christi 2024-05-30
        assert!(g.month(3).unwrap().day(1).unwrap().is_holiday());
        assert!(g.month(4).unwrap().day(30).unwrap().is_holiday());
    }

    #[test]
    fn weekend_holidays_not_flagged() {
        // 2022-01-01 is a Saturday, 2022-12-25 a Sunday
        let g = grid(2022);
        let new_year = g.month(0).unwrap().day(1).unwrap();
        let christmas = g.month(11).unwrap().day(25).unwrap();

        assert_eq!(new_year.class(), WeekdayClass::Saturday);
        assert!(!new_year.is_holiday());
        assert_eq!(christmas.class(), WeekdayClass::Sunday);
        assert!(!christmas.is_holiday());

        // Easter Sunday itself is never flagged
        assert!(!g.month(3).unwrap().day(17).unwrap().is_holiday());
    }

    #[test]
    fn toggle_flips_one_day() {
        let g = grid(2024);
        let toggled = g.toggle_day(0, 5);

        assert!(toggled.day_at(0, 5).unwrap().is_selected());
        assert_eq!(toggled.day_at(0, 5).unwrap().day_num(), 5);
        assert_eq!(toggled.selected_days().count(), 1);
        assert!(g.selected_days().next().is_none());
        assert_ne!(g, toggled);
        assert_eq!(toggled.toggle_day(0, 5), g);
    }

    #[test]
    fn toggle_padding_is_noop() {
        let g = grid(2024);

        assert_eq!(g.toggle_day(0, 0), g);
        assert_eq!(g.toggle_day(1, 36), g);
        assert_eq!(g.toggle_day(0, GRID_COLUMNS + 10), g);
        assert_eq!(g.toggle_day(12, 5), g);
    }

    #[test]
    fn regenerate_resets_selection() {
        let g = grid(2024).toggle_day(3, 10);
        assert_eq!(g.selected_days().count(), 1);
        assert_eq!(grid(2024).selected_days().count(), 0);
    }

    #[test]
    fn early_years_generate() {
        let g = grid(1000);
        assert_eq!(g.months().iter().map(|m| m.days().len()).sum::<usize>(), 365);
    }

    #[test]
    fn unrepresentable_year() {
        assert!(YearGrid::generate(i32::MAX, &Locale::default(), &HolidayTable::default()).is_err());
    }
}
