//! Raw keyboard input.
//!
//! Reads exactly one logical key per call. The terminal is switched into raw
//! mode only for the duration of the read, and is switched back on every exit
//! path: normal return, error return, and panic unwind.

use std::io::{self, Read};

use crossterm::terminal;
use tracing::{trace, warn};

use crate::error::{HistoryError, Result};

/// Escape byte that introduces a control sequence.
const ESC: u8 = 0x1b;

/// Control Sequence Introducer, the byte after ESC for arrow and page keys.
const CSI: u8 = b'[';

/// Ctrl+C, delivered as a plain byte while raw mode is active.
const INTERRUPT: u8 = 0x03;

/// Known `ESC [ ...` sequences, keyed by the bytes after the introducer.
///
/// Letter-terminated sequences are one byte long, digit-prefixed ones carry a
/// trailing `~`. Adding a key only needs a new row here.
const CSI_SEQUENCES: &[(&[u8], KeyEvent)] = &[
    (b"A".as_slice(), KeyEvent::Up),
    (b"B".as_slice(), KeyEvent::Down),
    (b"5~".as_slice(), KeyEvent::PageUp),
    (b"6~".as_slice(), KeyEvent::PageDown),
];

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Carriage return or line feed.
    Enter,
    /// `q` or Ctrl+C.
    Quit,
    /// Anything else, including unknown escape sequences.
    Unrecognized,
}

/// Something that yields one key event per call.
pub trait KeySource {
    /// Block until the next key is available and decode it.
    fn read_key(&mut self) -> Result<KeyEvent>;
}

/// Decode one key from a byte stream.
///
/// A lone byte maps directly. An escape byte is always followed by two more
/// reads; when the second of those is a digit, one further byte is read to
/// complete the `ESC [ <digit> ~` form.
pub fn decode_key<R: Read>(reader: &mut R) -> Result<KeyEvent> {
    let key = match read_byte(reader)? {
        ESC => decode_escape(reader)?,
        b'\r' | b'\n' => KeyEvent::Enter,
        b'q' | INTERRUPT => KeyEvent::Quit,
        _ => KeyEvent::Unrecognized,
    };
    Ok(key)
}

fn decode_escape<R: Read>(reader: &mut R) -> Result<KeyEvent> {
    let introducer = read_byte(reader)?;
    let first = read_byte(reader)?;

    if introducer != CSI {
        return Ok(KeyEvent::Unrecognized);
    }

    let mut body = [first, 0];
    let len = if first.is_ascii_digit() {
        body[1] = read_byte(reader)?;
        2
    } else {
        1
    };

    Ok(lookup_csi(&body[..len]))
}

fn lookup_csi(body: &[u8]) -> KeyEvent {
    CSI_SEQUENCES
        .iter()
        .find(|(bytes, _)| *bytes == body)
        .map_or(KeyEvent::Unrecognized, |(_, key)| *key)
}

/// Read a single byte, retrying on `Interrupted`.
fn read_byte<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Err(HistoryError::InputUnavailable),
            Ok(_) => return Ok(buf[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "Terminal input read failed");
                return Err(HistoryError::InputUnavailable);
            }
        }
    }
}

/// Switches the terminal between raw and cooked input.
pub trait TerminalMode {
    /// Whether raw mode is currently on.
    fn is_raw(&self) -> io::Result<bool>;
    /// Turn raw mode on.
    fn enable_raw(&self) -> io::Result<()>;
    /// Turn raw mode off.
    fn disable_raw(&self) -> io::Result<()>;
}

impl<T: TerminalMode + ?Sized> TerminalMode for &T {
    fn is_raw(&self) -> io::Result<bool> {
        (**self).is_raw()
    }

    fn enable_raw(&self) -> io::Result<()> {
        (**self).enable_raw()
    }

    fn disable_raw(&self) -> io::Result<()> {
        (**self).disable_raw()
    }
}

/// The process terminal, driven through crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn is_raw(&self) -> io::Result<bool> {
        terminal::is_raw_mode_enabled()
    }

    fn enable_raw(&self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable_raw(&self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// Scoped raw mode.
///
/// Captures whether raw mode was already active, enables it, and puts the
/// terminal back the way it found it. Prefer [`RawModeGuard::release`] so a
/// restoration failure reaches the caller; dropping the guard restores on a
/// best-effort basis.
#[derive(Debug)]
pub struct RawModeGuard<M: TerminalMode = CrosstermMode> {
    mode: M,
    was_raw: bool,
    released: bool,
}

impl RawModeGuard {
    /// Enable raw mode on the process terminal, remembering the previous mode.
    pub fn acquire() -> Result<Self> {
        Self::acquire_with(CrosstermMode)
    }
}

impl<M: TerminalMode> RawModeGuard<M> {
    /// Enable raw mode through `mode`, remembering the previous mode.
    pub fn acquire_with(mode: M) -> Result<Self> {
        let was_raw = mode
            .is_raw()
            .map_err(|e| HistoryError::terminal("Failed to query terminal mode", e))?;

        if !was_raw {
            mode.enable_raw().map_err(|e| {
                HistoryError::terminal(
                    "Cannot enable raw mode - no interactive terminal available",
                    e,
                )
            })?;
        }

        Ok(Self {
            mode,
            was_raw,
            released: false,
        })
    }

    /// Restore the previous mode and report whether that worked.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.restore()
    }

    fn restore(&self) -> Result<()> {
        if self.was_raw {
            return Ok(());
        }
        self.mode
            .disable_raw()
            .map_err(|e| HistoryError::terminal("Failed to restore terminal mode", e))
    }
}

impl<M: TerminalMode> Drop for RawModeGuard<M> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.restore() {
            warn!(error = %e, "Could not restore terminal mode during unwind");
        }
    }
}

/// Keys read from a terminal with raw mode held per read.
///
/// Defaults to standard input and the process terminal.
#[derive(Debug)]
pub struct TerminalKeys<R = io::Stdin, M = CrosstermMode> {
    input: R,
    mode: M,
}

impl TerminalKeys {
    /// Create a key source over the process's standard input.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(io::stdin(), CrosstermMode)
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read, M: TerminalMode> TerminalKeys<R, M> {
    /// Read from `input`, switching modes through `mode`.
    pub fn with_parts(input: R, mode: M) -> Self {
        Self { input, mode }
    }
}

impl<R: Read, M: TerminalMode> KeySource for TerminalKeys<R, M> {
    fn read_key(&mut self) -> Result<KeyEvent> {
        let guard = RawModeGuard::acquire_with(&self.mode)?;
        let decoded = decode_key(&mut self.input);

        // A terminal left in raw mode outranks a failed read.
        guard.release()?;

        let key = decoded?;
        trace!(?key, "Decoded key");
        Ok(key)
    }
}

/// Keys decoded from an arbitrary byte stream, without touching the terminal.
///
/// Useful for scripted input and for non-interactive front ends.
#[derive(Debug)]
pub struct ReaderKeys<R> {
    reader: R,
}

impl<R: Read> ReaderKeys<R> {
    /// Wrap a byte stream.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> KeySource for ReaderKeys<R> {
    fn read_key(&mut self) -> Result<KeyEvent> {
        decode_key(&mut self.reader)
    }
}
