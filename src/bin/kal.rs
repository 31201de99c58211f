extern crate kalendarz as lib;

use chrono::{Datelike, Local};
use flexi_logger::{FileSpec, Logger};
use lib::ui::{self, App, HolidayLegend, Theme, YearView};
use lib::YearGrid;
use std::convert::TryFrom;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "kal",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Kalendarz - a year at a glance with weekends and public holidays."
)]
pub struct Args {
    #[structopt(
        name = "YEAR",
        help = "year to show (1000-9999), defaults to the current one",
        parse(try_from_str = ui::validate_year)
    )]
    pub year: Option<i32>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        // Raw mode is still active here, it is only left while unwinding
        let report = format!(
            "{}{}\nKalendarz ran into a fatal error!\n\
             Consider filing an issue with a log file and the backtrace below.\n\
             {}\n{:?}\n",
            termion::screen::ToMainScreen,
            termion::cursor::Show,
            info,
            backtrace::Backtrace::new()
        );

        print!("{}", ui::raw_lines(&report));
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let year = args.year.unwrap_or_else(|| Local::now().year());

    if args.show {
        let grid = YearGrid::generate(year, &config.locale, &config.holidays)?;
        let holidays = config.holidays.holidays(year)?;
        let theme = Theme::try_from(&config.theme)?;
        let colored = termion::is_tty(&stdout());

        print!(
            "{}",
            YearView::new(&grid, &config.locale, &theme).colored(colored)
        );
        println!();
        print!("{}", HolidayLegend(&holidays));

        return Ok(());
    }

    let mut app = App::new(&config, year)?;

    app.run()
}
