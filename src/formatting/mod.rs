use colored::Color;
use std::borrow::Cow;
use serde::Deserialize;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto, // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

/// How the text report is styled. Passed to the renderer explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    /// Unicode status symbols instead of bracketed ASCII tags.
    pub symbols: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            symbols: true,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, symbols: bool) -> Self {
        Self { color, symbols }
    }

    /// Apply `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE` on top of `color`.
    pub fn from_env(color: ColorMode) -> Self {
        Self::resolve(color, |key| env::var(key).ok())
    }

    fn resolve(color: ColorMode, var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new(color, true);
        if color != ColorMode::Auto {
            return config;
        }

        // https://no-color.org
        if var("NO_COLOR").is_some() {
            config.color = ColorMode::Never;
        }
        if var("CLICOLOR").as_deref() == Some("0") {
            config.color = ColorMode::Never;
        }
        if var("CLICOLOR_FORCE").as_deref() == Some("1") {
            config.color = ColorMode::Always;
        }
        config
    }

    /// ASCII only, no colors.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            symbols: false,
        }
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        if *self == Self::plain() {
            Box::new(PlainFormatter)
        } else {
            Box::new(ColoredFormatter::new(*self))
        }
    }
}

pub trait OutputFormatter {
    fn success(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn symbol(&self, symbol: &str, fallback: &str) -> String;
    fn dim(&self, text: &str) -> String;
}

pub struct ColoredFormatter {
    config: FormattingConfig,
    use_color: bool,
}

/// SGR attribute codes; colors come from `Color::to_fg_str`.
const BOLD: &str = "1";
const DIM: &str = "2";

impl ColoredFormatter {
    /// Color use comes from `config` alone, never from `colored`'s
    /// process-wide switch.
    pub fn new(config: FormattingConfig) -> Self {
        let use_color = config.color.should_use_color();
        Self { config, use_color }
    }

    fn paint(&self, text: &str, codes: &[Cow<'static, str>]) -> String {
        if self.use_color {
            format!("\x1b[{}m{text}\x1b[0m", codes.join(";"))
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        self.paint(text, &[Color::Green.to_fg_str()])
    }

    fn error(&self, text: &str) -> String {
        self.paint(text, &[Color::Red.to_fg_str()])
    }

    fn warning(&self, text: &str) -> String {
        self.paint(text, &[Color::Yellow.to_fg_str()])
    }

    fn header(&self, text: &str) -> String {
        self.paint(text, &[Color::Blue.to_fg_str(), BOLD.into()])
    }

    fn symbol(&self, symbol: &str, fallback: &str) -> String {
        if self.config.symbols {
            symbol.to_string()
        } else {
            fallback.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, &[DIM.into()])
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn symbol(&self, _symbol: &str, fallback: &str) -> String {
        fallback.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

fn detect_color_support() -> bool {
    if env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    std::io::stdout().is_terminal()
}
