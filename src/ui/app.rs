use log;
use std::convert::TryFrom;
use std::io::{self, Write};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;
use termion::{clear, cursor};

use super::{raw_lines, HolidayLegend, Theme, YearView, MAX_YEAR, MIN_YEAR};
use crate::calendar::{YearGrid, GRID_COLUMNS, MONTHS};
use crate::config::Config;
use crate::error::Result;
use crate::holiday::Holidays;

pub struct App<'a> {
    config: &'a Config,
    theme: Theme,
    grid: YearGrid,
    holidays: Holidays,
    cursor: (usize, usize),
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, year: i32) -> Result<App<'a>> {
        let theme = Theme::try_from(&config.theme)?;
        let grid = YearGrid::generate(year, &config.locale, &config.holidays)?;
        let holidays = config.holidays.holidays(year)?;

        let cursor = (0, grid.months()[0].offset() as usize);

        Ok(App {
            config,
            theme,
            grid,
            holidays,
            cursor,
        })
    }

    pub fn grid(&self) -> &YearGrid {
        &self.grid
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn move_cursor(&mut self, months: isize, columns: isize) {
        let (month0, column) = self.cursor;

        self.cursor = (
            clamp_add(month0, months, MONTHS as usize - 1),
            clamp_add(column, columns, GRID_COLUMNS - 1),
        );
    }

    pub fn toggle(&mut self) {
        let (month0, column) = self.cursor;
        self.grid = self.grid.toggle_day(month0, column);
    }

    /// Switches to `year`, dropping every selection. Years outside the
    /// displayable range are ignored.
    pub fn change_year(&mut self, year: i32) -> Result<()> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            log::warn!("Refusing to switch to year {}", year);
            return Ok(());
        }

        self.grid = YearGrid::generate(year, &self.config.locale, &self.config.holidays)?;
        self.holidays = self.config.holidays.holidays(year)?;
        log::info!("Switched to year {}", year);

        Ok(())
    }

    fn status_line(&self) -> String {
        let (month0, column) = self.cursor;
        let selected = self.grid.selected_days().count();

        match self.grid.day_at(month0, column) {
            Some(day) => format!(
                "{:02}.{:02}.{} {} [{}]",
                day.day_num(),
                month0 + 1,
                self.grid.year(),
                self.holidays
                    .name_of(day.day_num(), month0 as u32)
                    .unwrap_or(""),
                selected
            ),
            None => format!("[{}]", selected),
        }
    }

    pub fn render(&self) -> String {
        let (month0, column) = self.cursor;
        let view = YearView::new(&self.grid, &self.config.locale, &self.theme).cursor(month0, column);

        format!("{}\n{}\n\n{}", view, self.status_line(), HolidayLegend(&self.holidays))
    }

    fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "{}{}{}",
            clear::All,
            cursor::Goto(1, 1),
            raw_lines(&self.render())
        )?;
        out.flush()
    }

    pub fn run(&mut self) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let stdout = io::stdout().into_raw_mode()?;
        let mut screen = AlternateScreen::from(stdout);
        write!(screen, "{}", cursor::Hide)?;

        self.draw(&mut screen)?;

        let stdin = io::stdin();
        for key in stdin.keys() {
            match key? {
                Key::Char('q') | Key::Esc => break,
                Key::Char('h') | Key::Left => self.move_cursor(0, -1),
                Key::Char('l') | Key::Right => self.move_cursor(0, 1),
                Key::Char('k') | Key::Up => self.move_cursor(-1, 0),
                Key::Char('j') | Key::Down => self.move_cursor(1, 0),
                Key::Char(' ') | Key::Char('\n') => self.toggle(),
                Key::Char('n') => self.change_year(self.grid.year() + 1)?,
                Key::Char('p') => self.change_year(self.grid.year() - 1)?,
                _ => continue,
            }

            self.draw(&mut screen)?;
        }

        write!(screen, "{}", cursor::Show)?;
        screen.flush()?;

        Ok(())
    }
}

fn clamp_add(value: usize, delta: isize, max: usize) -> usize {
    let moved = value as isize + delta;
    moved.max(0).min(max as isize) as usize
}
