use std::convert::TryFrom;
use termion::color::AnsiValue;

use super::CellStyle;
use crate::config::ThemeSpec;
use crate::error::{Error, ErrorKind};

const BASIC_COLORS: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

pub fn parse_color(name: &str) -> Result<AnsiValue, Error> {
    let name = name.trim().to_lowercase();

    if let Some(idx) = BASIC_COLORS.iter().position(|c| *c == name) {
        return Ok(AnsiValue(idx as u8));
    }

    if let Some(idx) = name
        .strip_prefix("light")
        .and_then(|base| BASIC_COLORS.iter().position(|c| *c == base))
    {
        return Ok(AnsiValue(idx as u8 + 8));
    }

    if let Some(shade) = name
        .strip_prefix("gray")
        .and_then(|shade| shade.parse::<u8>().ok())
        .filter(|shade| *shade < 24)
    {
        return Ok(AnsiValue::grayscale(shade));
    }

    name.parse::<u8>().map(AnsiValue).map_err(|_| {
        Error::new(
            ErrorKind::ConfigInvalid,
            &format!("unknown colour '{}'", name),
        )
    })
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub header_fg: AnsiValue,
    pub selected_fg: AnsiValue,
    pub selected_bg: AnsiValue,
    pub saturday_bg: AnsiValue,
    pub festive_bg: AnsiValue,
    pub cursor_bg: AnsiValue,
}

impl Theme {
    /// Colours of a cell as (foreground, background); `None` keeps the
    /// terminal default.
    pub fn colors(&self, style: CellStyle) -> (Option<AnsiValue>, Option<AnsiValue>) {
        match style {
            CellStyle::Plain => (None, None),
            CellStyle::Saturday => (None, Some(self.saturday_bg)),
            CellStyle::Festive => (None, Some(self.festive_bg)),
            CellStyle::Selected => (Some(self.selected_fg), Some(self.selected_bg)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_fg: AnsiValue(3),
            selected_fg: AnsiValue(7),
            selected_bg: AnsiValue::grayscale(8),
            saturday_bg: AnsiValue::grayscale(18),
            festive_bg: AnsiValue(9),
            cursor_bg: AnsiValue(4),
        }
    }
}

impl TryFrom<&ThemeSpec> for Theme {
    type Error = Error;

    fn try_from(spec: &ThemeSpec) -> Result<Self, Self::Error> {
        Ok(Theme {
            header_fg: parse_color(&spec.header_fg)?,
            selected_fg: parse_color(&spec.selected_fg)?,
            selected_bg: parse_color(&spec.selected_bg)?,
            saturday_bg: parse_color(&spec.saturday_bg)?,
            festive_bg: parse_color(&spec.festive_bg)?,
            cursor_bg: parse_color(&spec.cursor_bg)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names() {
        assert_eq!(parse_color("red").unwrap().0, 1);
        assert_eq!(parse_color("LightRed").unwrap().0, 9);
        assert_eq!(parse_color("gray0").unwrap().0, 232);
        assert_eq!(parse_color("208").unwrap().0, 208);
        assert!(parse_color("gray24").is_err());
        assert!(parse_color("mauve").is_err());
    }

    #[test]
    fn default_spec_matches_default_theme() {
        let theme = Theme::try_from(&ThemeSpec::default()).unwrap();
        let default = Theme::default();

        assert_eq!(theme.header_fg.0, default.header_fg.0);
        assert_eq!(theme.selected_bg.0, default.selected_bg.0);
        assert_eq!(theme.festive_bg.0, default.festive_bg.0);
    }
}
