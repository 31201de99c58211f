pub mod calendar;
pub mod config;
pub mod error;
pub mod holiday;
pub mod ui;

pub use calendar::{Day, MonthRow, WeekdayClass, YearGrid, GRID_COLUMNS};
pub use error::{Error, ErrorKind, Result};
pub use holiday::{easter_sunday, HolidayDate, HolidayTable, Holidays};
