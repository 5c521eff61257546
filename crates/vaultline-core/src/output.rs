//! Terminal colour handling
//!
//! Colour is disabled when `NO_COLOR` is set to a non-empty value or when
//! the stream is not a terminal.

/// Environment variable that opts out of ANSI colour
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// ANSI color codes (only used when terminal supports it)
pub struct Colors {
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Colors {
    /// Get colors for terminal output
    pub fn new(color_enabled: bool) -> Self {
        if color_enabled {
            Self {
                red: "\x1b[0;31m",
                green: "\x1b[0;32m",
                yellow: "\x1b[0;33m",
                cyan: "\x1b[0;36m",
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                red: "",
                green: "",
                yellow: "",
                cyan: "",
                bold: "",
                dim: "",
                reset: "",
            }
        }
    }

    /// Colours for stdout, honouring `NO_COLOR`
    pub fn auto() -> Self {
        Self::new(color_enabled(Stream::Stdout))
    }
}

/// Standard output streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Whether ANSI colour should be written to `stream`
pub fn color_enabled(stream: Stream) -> bool {
    !no_color_requested(std::env::var_os(NO_COLOR_ENV).as_deref()) && is_tty(stream)
}

fn no_color_requested(value: Option<&std::ffi::OsStr>) -> bool {
    value.map(|v| !v.is_empty()).unwrap_or(false)
}

/// Check if a stream is a TTY
#[cfg(unix)]
pub fn is_tty(stream: Stream) -> bool {
    let fd = match stream {
        Stream::Stdout => libc::STDOUT_FILENO,
        Stream::Stderr => libc::STDERR_FILENO,
    };
    unsafe { libc::isatty(fd) != 0 }
}

#[cfg(not(unix))]
pub fn is_tty(stream: Stream) -> bool {
    use std::io::IsTerminal;

    match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_no_color_values() {
        assert!(!no_color_requested(None));
        assert!(!no_color_requested(Some(OsStr::new(""))));
        assert!(no_color_requested(Some(OsStr::new("1"))));
    }

    #[test]
    fn test_is_tty_matches_stream() {
        use std::io::IsTerminal;

        assert_eq!(is_tty(Stream::Stdout), std::io::stdout().is_terminal());
        assert_eq!(is_tty(Stream::Stderr), std::io::stderr().is_terminal());
    }

    #[test]
    fn test_disabled_colors_are_empty() {
        let colors = Colors::new(false);
        assert!(colors.red.is_empty());
        assert!(colors.reset.is_empty());

        let colors = Colors::new(true);
        assert_eq!(colors.reset, "\x1b[0m");
    }
}
