use log;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::holiday::HolidayTable;

const CONFIG_PATH_ENV_VAR: &str = "KALENDARZ_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    // Honours $XDG_CONFIG_HOME on Linux
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("kalendarz").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".kalendarz.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first existing file out of
/// [`find_configfile_locations`], falling back to the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    if let Some(path) = find_configfile_locations()
        .into_iter()
        .find(|path| path.is_file())
    {
        return Config::from_file(&path);
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}

/// Month names and Sunday-first weekday labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub title: String,
    pub month_names: [String; 12],
    pub weekday_labels: [String; 7],
}

impl Default for Locale {
    fn default() -> Self {
        let months = [
            "Styczeń",
            "Luty",
            "Marzec",
            "Kwiecień",
            "Maj",
            "Czerwiec",
            "Lipiec",
            "Sierpień",
            "Wrzesień",
            "Październik",
            "Listopad",
            "Grudzień",
        ];
        let weekdays = ["Nd", "Pn", "Wt", "Śr", "Cz", "Pt", "So"];

        Locale {
            title: "Kalendarz".to_owned(),
            month_names: months.map(str::to_owned),
            weekday_labels: weekdays.map(str::to_owned),
        }
    }
}

impl Locale {
    pub fn month_name(&self, month0: u32) -> &str {
        &self.month_names[month0 as usize % 12]
    }

    /// Label for a grid column; the grid repeats the week every 7 columns.
    pub fn weekday_label(&self, column: usize) -> &str {
        &self.weekday_labels[column % 7]
    }
}

/// Colour names, resolved by the terminal front end. Accepts the eight
/// basic ANSI names, their `light` variants, `gray0`..`gray23` and plain
/// 256-colour numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    pub header_fg: String,
    pub selected_fg: String,
    pub selected_bg: String,
    pub saturday_bg: String,
    pub festive_bg: String,
    pub cursor_bg: String,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        ThemeSpec {
            header_fg: "yellow".to_owned(),
            selected_fg: "white".to_owned(),
            selected_bg: "gray8".to_owned(),
            saturday_bg: "gray18".to_owned(),
            festive_bg: "lightred".to_owned(),
            cursor_bg: "blue".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub holidays: HolidayTable,
    pub theme: ThemeSpec,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        log::info!("Loading config from '{}'", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            Error::from(e).with_msg(&format!("could not read '{}'", path.display()))
        })?;

        content.parse()
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;

        if let Err(e) = config.holidays.validate() {
            log::warn!("{}", e);
            return Err(e);
        }

        Ok(config)
    }
}
