//! Terminal I/O for a sweep run.
//!
//! stdout carries the audit trail (inventory, one line per delete, summary)
//! and stderr carries diagnostics. Every line is flushed as soon as it is
//! written so an interrupted run still shows what was already deleted.
//! Commands write through [`IOStreams`] instead of `println!()` so tests can
//! capture both streams.

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};

use console::Style;

type Buffer = Arc<Mutex<Vec<u8>>>;

/// A line-oriented output sink: a real stream or an in-memory buffer.
struct Sink(Mutex<Box<dyn Write + Send>>);

impl Sink {
    fn new(w: impl Write + Send + 'static) -> Self {
        Self(Mutex::new(Box::new(w)))
    }

    fn capture() -> (Self, Buffer) {
        let buf = Buffer::default();
        (Self::new(Captured(buf.clone())), buf)
    }

    /// Output errors (closed pipe and the like) are ignored: there is
    /// nowhere left to report them.
    fn line(&self, args: fmt::Arguments<'_>) {
        let mut w = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = w.write_fmt(args);
        let _ = w.write_all(b"\n");
        let _ = w.flush();
    }
}

struct Captured(Buffer);

impl Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn read(buf: &Buffer) -> String {
    String::from_utf8_lossy(&buf.lock().unwrap_or_else(PoisonError::into_inner)).into_owned()
}

/// Handle on what a test [`IOStreams`] has written.
#[derive(Debug, Clone)]
pub struct TestOutput {
    out: Buffer,
    err: Buffer,
}

impl TestOutput {
    /// Everything written to stdout so far.
    pub fn stdout(&self) -> String {
        read(&self.out)
    }

    /// Everything written to stderr so far.
    pub fn stderr(&self) -> String {
        read(&self.err)
    }
}

/// stdout and stderr plus what is known about the terminal.
pub struct IOStreams {
    stdin_tty: bool,
    stdout_tty: bool,
    color: Option<bool>,
    never_prompt: bool,
    out: Sink,
    err: Sink,
}

impl fmt::Debug for IOStreams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IOStreams")
            .field("stdin_tty", &self.stdin_tty)
            .field("stdout_tty", &self.stdout_tty)
            .field("color", &self.color)
            .field("never_prompt", &self.never_prompt)
            .finish_non_exhaustive()
    }
}

impl IOStreams {
    /// Streams for the process terminal. `NO_COLOR` turns colour off.
    pub fn system() -> Self {
        Self {
            stdin_tty: io::stdin().is_terminal(),
            stdout_tty: io::stdout().is_terminal(),
            color: std::env::var_os("NO_COLOR").map(|_| false),
            never_prompt: false,
            out: Sink::new(io::stdout()),
            err: Sink::new(io::stderr()),
        }
    }

    /// Non-interactive, colourless streams writing into memory.
    pub fn test_with_output() -> (Self, TestOutput) {
        let (out, out_buf) = Sink::capture();
        let (err, err_buf) = Sink::capture();
        let ios = Self {
            stdin_tty: false,
            stdout_tty: false,
            color: Some(false),
            never_prompt: true,
            out,
            err,
        };
        (
            ios,
            TestOutput {
                out: out_buf,
                err: err_buf,
            },
        )
    }

    /// Override stdin terminal detection.
    pub fn set_stdin_tty(&mut self, tty: bool) {
        self.stdin_tty = tty;
    }

    /// Override stdout terminal detection.
    pub fn set_stdout_tty(&mut self, tty: bool) {
        self.stdout_tty = tty;
    }

    /// Forbid (or allow) interactive prompts regardless of the terminal.
    pub fn set_never_prompt(&mut self, never: bool) {
        self.never_prompt = never;
    }

    /// Whether stdout is a terminal.
    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_tty
    }

    /// Whether the operator can be asked something: both ends are a
    /// terminal and prompts are not disabled.
    pub fn can_prompt(&self) -> bool {
        self.stdin_tty && self.stdout_tty && !self.never_prompt
    }

    /// Colours for the current output.
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            enabled: self.color.unwrap_or(self.stdout_tty),
        }
    }

    /// Write `s` and a newline to stdout.
    pub fn println_out(&self, s: &str) {
        self.out.line(format_args!("{s}"));
    }

    /// Write `s` and a newline to stderr.
    pub fn println_err(&self, s: &str) {
        self.err.line(format_args!("{s}"));
    }

    /// Formatted line on stdout. Used by [`ios_println!`](crate::ios_println).
    pub fn writeln_out(&self, args: fmt::Arguments<'_>) {
        self.out.line(args);
    }

    /// Formatted line on stderr. Used by [`ios_eprintln!`](crate::ios_eprintln).
    pub fn writeln_err(&self, args: fmt::Arguments<'_>) {
        self.err.line(args);
    }
}

/// Styling for status lines; plain text when colour is off.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    fn paint(self, text: &str, style: Style) -> String {
        if self.enabled {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Bold.
    pub fn bold(self, text: &str) -> String {
        self.paint(text, Style::new().bold())
    }

    /// Yellow.
    pub fn warning(self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }

    /// Green check mark for a completed delete.
    pub fn success_icon(self) -> String {
        self.paint("✓", Style::new().green())
    }

    /// Yellow `!` for a delete that did not go through.
    pub fn warning_icon(self) -> String {
        self.paint("!", Style::new().yellow())
    }

    /// Red `X` for a fatal error.
    pub fn error_icon(self) -> String {
        self.paint("X", Style::new().red())
    }
}

/// `println!()` onto an [`IOStreams`] stdout.
#[macro_export]
macro_rules! ios_println {
    ($ios:expr) => {
        $ios.println_out("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_out(format_args!($($arg)*))
    };
}

/// `eprintln!()` onto an [`IOStreams`] stderr.
#[macro_export]
macro_rules! ios_eprintln {
    ($ios:expr) => {
        $ios.println_err("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_err(format_args!($($arg)*))
    };
}
