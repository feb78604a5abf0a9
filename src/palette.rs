//! Terminal color palettes.
//!
//! Two fixed palettes map each [`ColorRole`] to an escape sequence. The plain
//! palette maps every role to the empty string, so painting with it is the
//! identity.

use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

/// Semantic role a piece of output plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Pass,
    Fail,
    SpecTiming,
    SuiteTiming,
    Ignore,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// ANSI escape sequences.
    Ansi,
    /// No escape sequences at all.
    #[default]
    Plain,
}

impl Palette {
    pub fn from_color_flag(color: bool) -> Self {
        if color {
            Palette::Ansi
        } else {
            Palette::Plain
        }
    }

    pub fn code(&self, role: ColorRole) -> &'static str {
        match self {
            Palette::Plain => "",
            Palette::Ansi => match role {
                ColorRole::Pass => "\x1b[32m",
                ColorRole::Fail => "\x1b[31m",
                ColorRole::SpecTiming => "\x1b[34m",
                ColorRole::SuiteTiming => "\x1b[33m",
                ColorRole::Ignore => "\x1b[37m",
                ColorRole::Neutral => "\x1b[0m",
            },
        }
    }

    /// Wraps `text` in the role's code and a trailing reset.
    pub fn paint(&self, text: &str, role: ColorRole) -> String {
        let code = match self.code(role) {
            "" => self.code(ColorRole::Neutral),
            code => code,
        };
        format!("{}{}{}", code, text, self.code(ColorRole::Neutral))
    }
}

/// Removes every SGR escape sequence from `text`.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
