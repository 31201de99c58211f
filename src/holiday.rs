//! Fixed-date and Easter-relative holidays.
//!
//! A [`HolidayTable`] describes which holidays exist; [`HolidayTable::holidays`]
//! resolves it against a single year. Resolved dates carry no year, only the
//! day of month and the zero-based month index.

use chrono::{Datelike, Duration, NaiveDate};
use derive_more::Constructor;
use log;
use serde::Deserialize;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// Movable holidays have to stay within a year of Easter Sunday.
pub const MAX_EASTER_OFFSET: i64 = 366;

/// Day of month and zero-based month index of a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Constructor)]
pub struct HolidayDate {
    pub day: u32,
    pub month0: u32,
}

impl HolidayDate {
    pub fn matches(&self, day: u32, month0: u32) -> bool {
        self.day == day && self.month0 == month0
    }
}

impl From<NaiveDate> for HolidayDate {
    fn from(date: NaiveDate) -> Self {
        HolidayDate::new(date.day(), date.month0())
    }
}

impl fmt::Display for HolidayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}", self.day, self.month0 + 1)
    }
}

/// A holiday falling on the same date every year. `month` is one-based, as
/// written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixedHoliday {
    pub name: String,
    pub day: u32,
    pub month: u32,
}

/// A holiday `offset` days after Easter Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovableHoliday {
    pub name: String,
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HolidayTable {
    pub fixed: Vec<FixedHoliday>,
    pub movable: Vec<MovableHoliday>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub name: String,
    pub date: HolidayDate,
}

/// Holidays of one particular year. May contain the same date more than
/// once when a fixed and a movable holiday coincide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holidays {
    year: i32,
    entries: Vec<Holiday>,
}

fn fixed(name: &str, day: u32, month: u32) -> FixedHoliday {
    FixedHoliday {
        name: name.to_owned(),
        day,
        month,
    }
}

fn movable(name: &str, offset: i64) -> MovableHoliday {
    MovableHoliday {
        name: name.to_owned(),
        offset,
    }
}

impl Default for HolidayTable {
    fn default() -> Self {
        HolidayTable {
            fixed: vec![
                fixed("Nowy Rok", 1, 1),
                fixed("Trzech Króli", 6, 1),
                fixed("Święto Pracy", 1, 5),
                fixed("Święto Konstytucji 3 Maja", 3, 5),
                fixed("Wniebowzięcie NMP", 15, 8),
                fixed("Wszystkich Świętych", 1, 11),
                fixed("Święto Niepodległości", 11, 11),
                fixed("Boże Narodzenie", 25, 12),
                fixed("Drugi dzień Bożego Narodzenia", 26, 12),
            ],
            movable: vec![
                movable("Wielkanoc", 0),
                movable("Poniedziałek Wielkanocny", 1),
                movable("Boże Ciało", 60),
            ],
        }
    }
}

/// Gregorian Easter Sunday after Meeus/Jones/Butcher.
///
/// Euclidean division keeps every intermediate value in range, so the result
/// always lies between March 22 and April 25. Years before 1583 get the
/// proleptic Gregorian answer. Fails only when `chrono` cannot represent
/// the year.
pub fn easter_sunday(year: i32) -> Result<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;

    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or_else(|| Error::year_out_of_range(year))
}

impl HolidayTable {
    /// Checks that every fixed holiday names an existing day and every
    /// movable one lies within [`MAX_EASTER_OFFSET`] days of Easter. February
    /// 29 is accepted; it simply does not occur in common years.
    pub fn validate(&self) -> Result<()> {
        for holiday in self.fixed.iter() {
            let valid = (1..=12).contains(&holiday.month)
                && NaiveDate::from_ymd_opt(2000, holiday.month, holiday.day).is_some();

            if !valid {
                return Err(Error::new(
                    ErrorKind::ConfigInvalid,
                    &format!(
                        "holiday '{}' has no valid date ({}.{})",
                        holiday.name, holiday.day, holiday.month
                    ),
                ));
            }
        }

        for holiday in self.movable.iter() {
            if holiday.offset.unsigned_abs() > MAX_EASTER_OFFSET as u64 {
                return Err(Error::new(
                    ErrorKind::ConfigInvalid,
                    &format!(
                        "holiday '{}' is {} days away from Easter, at most {} allowed",
                        holiday.name, holiday.offset, MAX_EASTER_OFFSET
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Resolves the table against `year`: fixed holidays first, then the
    /// Easter-relative ones in table order.
    pub fn holidays(&self, year: i32) -> Result<Holidays> {
        self.validate()?;
        let easter = easter_sunday(year)?;

        let mut entries: Vec<Holiday> = self
            .fixed
            .iter()
            .map(|h| Holiday {
                name: h.name.clone(),
                date: HolidayDate::new(h.day, h.month - 1),
            })
            .collect();

        for h in self.movable.iter() {
            let date = easter
                .checked_add_signed(Duration::days(h.offset))
                .ok_or_else(|| Error::year_out_of_range(year))?;

            entries.push(Holiday {
                name: h.name.clone(),
                date: HolidayDate::from(date),
            });
        }

        log::debug!(
            "{} holidays in {}, Easter Sunday on {}",
            entries.len(),
            year,
            easter
        );

        Ok(Holidays { year, entries })
    }
}

impl Holidays {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.entries.iter()
    }

    pub fn contains(&self, day: u32, month0: u32) -> bool {
        self.entries.iter().any(|h| h.date.matches(day, month0))
    }

    /// First name registered for the given date.
    pub fn name_of(&self, day: u32, month0: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|h| h.date.matches(day, month0))
            .map(|h| h.name.as_str())
    }
}
