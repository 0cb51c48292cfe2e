use clap::ValueEnum;
use color_eyre::config::{HookBuilder, Theme};

/// When to use coloured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    /// Never colour.
    No,
    /// Always colour.
    Yes,
    /// Colour when stdout is a terminal that supports it and `NO_COLOR` is unset.
    Auto,
}

impl Color {
    /// Resolves [Color::Auto] against the environment.
    pub fn is_enabled(self) -> bool {
        match self {
            Color::No => false,
            Color::Yes => true,
            Color::Auto => {
                if std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
                    false
                } else {
                    supports_color::on(supports_color::Stream::Stdout).is_some()
                }
            }
        }
    }
}

/// Installs the `color_eyre` panic and error report handlers, with a blank theme when colour is
/// disabled.
pub fn install_color_eyre(color: Color) -> color_eyre::Result<()> {
    if color.is_enabled() {
        color_eyre::install()
    } else {
        // Use an empty theme to disable error coloring
        HookBuilder::new().theme(Theme::new()).install()
    }
}
