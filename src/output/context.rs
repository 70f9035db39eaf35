use super::Theme;
use crate::error::Result;
use rich_rust::prelude::*;
use rich_rust::renderables::Renderable;
use serde::Serialize;
use std::io::IsTerminal;

/// Central output coordinator that respects json/quiet/plain modes.
pub struct OutputContext {
    /// Rich console for human-readable output
    console: Console,
    theme: Theme,
    mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Tables, colors and panels
    Rich,
    /// Line-oriented text without ANSI codes (for piping)
    Plain,
    /// JSON documents only
    Json,
    /// Results suppressed; errors still reach stderr
    Quiet,
}

impl OutputContext {
    /// Create from CLI-style flags.
    ///
    /// `NO_COLOR` or a non-terminal stdout selects plain output.
    #[must_use]
    pub fn from_flags(json: bool, quiet: bool, no_color: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else if no_color || std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal()
        {
            OutputMode::Plain
        } else {
            OutputMode::Rich
        };
        Self::with_mode(mode)
    }

    #[must_use]
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            console: Self::create_console(mode),
            theme: Theme::default(),
            mode,
        }
    }

    fn create_console(mode: OutputMode) -> Console {
        match mode {
            OutputMode::Rich => Console::new(),
            OutputMode::Plain | OutputMode::Quiet | OutputMode::Json => {
                Console::builder().no_color().force_terminal(false).build()
            }
        }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub fn is_rich(&self) -> bool {
        self.mode == OutputMode::Rich
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.mode == OutputMode::Plain
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render<R: Renderable>(&self, renderable: &R) {
        if self.is_rich() {
            self.console.print_renderable(renderable);
        }
    }

    /// Print pre-formatted text in plain mode.
    pub fn plain(&self, text: &str) {
        if self.is_plain() {
            print!("{text}");
        }
    }

    /// Print a document as pretty JSON in json mode.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json_pretty<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_wins() {
        let ctx = OutputContext::from_flags(true, true, true);
        assert_eq!(ctx.mode(), OutputMode::Json);
        assert!(ctx.is_json());
    }

    #[test]
    fn test_quiet_before_plain() {
        let ctx = OutputContext::from_flags(false, true, true);
        assert_eq!(ctx.mode(), OutputMode::Quiet);
        assert!(!ctx.is_plain());
    }

    #[test]
    fn test_no_color_is_plain() {
        let ctx = OutputContext::from_flags(false, false, true);
        assert!(ctx.is_plain());
        assert!(!ctx.is_rich());
    }
}
