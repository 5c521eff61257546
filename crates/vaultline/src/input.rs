//! Terminal input for secrets
//!
//! [`read_masked`] reads one line in raw mode, echoing `*` for each
//! character. Backspace removes the last character, Enter ends the line and
//! Ctrl-C aborts. The characters accumulate in a zeroizing buffer that is
//! wiped once the line has been copied out.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::debug;
use zeroize::Zeroizing;

/// Outcome of feeding one key to a [`MaskedLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done,
    Cancelled,
}

/// Initial buffer size; most secrets never outgrow it
const INITIAL_CAPACITY: usize = 128;

/// Line editor state for masked input
pub struct MaskedLine {
    buf: Zeroizing<String>,
}

impl Default for MaskedLine {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskedLine {
    pub fn new() -> Self {
        Self {
            buf: Zeroizing::new(String::with_capacity(INITIAL_CAPACITY)),
        }
    }

    /// Apply one key, writing the masked echo to `echo`
    pub fn handle<W: Write>(&mut self, key: KeyEvent, echo: &mut W) -> io::Result<Step> {
        if key.kind == KeyEventKind::Release {
            return Ok(Step::Continue);
        }

        let step = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                echo.write_all(b"\r\n")?;
                Step::Cancelled
            }
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => {
                echo.write_all(b"\r\n")?;
                Step::Done
            }
            KeyCode::Backspace => {
                if self.buf.pop().is_some() {
                    echo.write_all(b"\x08 \x08")?;
                }
                Step::Continue
            }
            KeyCode::Char(_) if is_chord(key.modifiers) => Step::Continue,
            KeyCode::Char(c) => {
                self.push(c);
                echo.write_all(b"*")?;
                Step::Continue
            }
            _ => Step::Continue,
        };
        echo.flush()?;
        Ok(step)
    }

    /// Append without letting `String` reallocate in place, which would
    /// free an unwiped copy of the partial secret
    fn push(&mut self, c: char) {
        if self.buf.len() + c.len_utf8() > self.buf.capacity() {
            let mut grown = Zeroizing::new(String::with_capacity(
                (self.buf.capacity() * 2).max(INITIAL_CAPACITY),
            ));
            grown.push_str(&self.buf);
            self.buf = grown;
        }
        self.buf.push(c);
    }

    pub fn len(&self) -> usize {
        self.buf.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Copy the line out; the internal buffer is wiped on drop
    pub fn finish(self) -> String {
        self.buf.as_str().to_owned()
    }
}

/// Ctrl or Alt shortcuts are not text. AltGr arrives as Ctrl+Alt and is.
fn is_chord(modifiers: KeyModifiers) -> bool {
    let both = KeyModifiers::CONTROL | KeyModifiers::ALT;
    modifiers.intersects(both) && !modifiers.contains(both)
}

/// A source of key presses
pub trait KeyEvents {
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

/// Key presses from the terminal (requires raw mode)
pub struct TerminalKeys;

impl KeyEvents for TerminalKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                return Ok(key);
            }
        }
    }
}

/// Scripted key presses
impl KeyEvents for VecDeque<KeyEvent> {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))
    }
}

/// Run a [`MaskedLine`] until Enter or Ctrl-C
pub fn read_with<K: KeyEvents, W: Write>(keys: &mut K, echo: &mut W) -> io::Result<String> {
    let mut line = MaskedLine::new();
    loop {
        match line.handle(keys.next_key()?, echo)? {
            Step::Continue => {}
            Step::Done => return Ok(line.finish()),
            Step::Cancelled => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"))
            }
        }
    }
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Prompt for a secret, echoing `*` per character.
///
/// Without a terminal (raw mode unavailable) this falls back to a hidden
/// prompt with no echo at all.
pub fn read_masked(prompt: &str) -> io::Result<String> {
    if let Err(e) = terminal::enable_raw_mode() {
        debug!(error = %e, "raw mode unavailable, using hidden prompt");
        return rpassword::prompt_password(prompt);
    }
    let _guard = RawModeGuard;

    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;
    read_with(&mut TerminalKeys, &mut stdout)
}

/// Prompt for a plain line of input, without the line terminator
pub fn read_line(prompt: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask a yes/no question; anything but y/yes is no
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let answer = read_line(&format!("{} [y/N] ", prompt))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
