//! Line classification, command dispatch, and script file handling.
//!
//! Every input line, whether typed at the prompt or read from a file,
//! passes through [`Interpreter::run_line`]. A line is classified by its leading
//! sigil and routed to the matching command; anything that is not a
//! directive comes back as [`Outcome::NotCommand`] so the caller can decide
//! what to do with it. The interactive prompt answers such lines with a
//! translation attempt; the file loader drops them.
//!
//! Commands never print directly. Their results are queued on
//! [`Interpreter::output`], and the caller drains and displays the queue
//! after each processed line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

use crate::scan::Scanner;
use crate::store::DictStore;

/// Dictionary file loaded at startup when no files are given, and by
/// `:reld`.
pub const DATA_FILE: &str = "assets.dat";

/// Upper bound on one input line, in bytes. A longer line is split at the
/// bound and the remainder is picked up as the next line.
pub const LINE_MAX: usize = libc::FILENAME_MAX as usize;

/// Nested `:load` ceiling. A file may load further files, including
/// itself; the ceiling turns a runaway include chain into a load failure.
const MAX_LOAD_DEPTH: usize = 32;

static HELP_MESSAGE: &str = "\
=---------------+ udat HELP +---------------=

Type a word at the prompt to translate it.
Lookups match either side of a dictionary
entry and ignore letter case and spaces.

Full commands list:
  :add [key; value]    add a word to the dictionary
  :rem key             remove a word from the dictionary
  :get key             get a word translation (only by key)
  :log                 print all words in the dictionary
  :msg text            print an info message to the console,
                       doesn't translate words
  :help                show this message
  :quit code message   exit with an error level and a
                       custom message (code is numeric)
  :load path           load a file as a script or a
                       dictionary file
  :save path           save the current dictionary into a
                       file; it overwrites old files
  :reld                reload the dictionary, removing all
                       entries and reloading default assets

Some commands can be replaced with a symbolic
form:
  [key; value]         -> :add [key; value]
  %key                 -> :get key
  !code message        -> :quit code message
  @path                -> :load path

=--------------------------------------------=";

// ── Results handed back to the caller ────────────────────────────────────────

/// A `quit` request: the exit code and an optional farewell message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub code: i32,
    pub message: Option<String>,
}

/// What a processed line asks of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line was a directive and has been executed.
    Handled,
    /// The line matched no directive.
    NotCommand,
    /// The line asked the session to end.
    Quit(Exit),
}

/// Unrecoverable input error: the process must terminate.
#[derive(Debug)]
pub struct RunError {
    pub message: String,
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RunError {}

/// Why a file could not be processed.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    Io(io::Error),
    /// The nested-load ceiling was hit.
    TooDeep,
    /// A line in the file was fatally malformed.
    Fatal(RunError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "{e}"),
            LoadError::TooDeep => write!(f, "load depth limit ({MAX_LOAD_DEPTH}) exceeded"),
            LoadError::Fatal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::TooDeep => None,
            LoadError::Fatal(e) => Some(e),
        }
    }
}

// ── Interpreter ───────────────────────────────────────────────────────────────

/// The dictionary interpreter: owns the store and queues command output for
/// the caller to display.
#[derive(Debug, Default)]
pub struct Interpreter {
    pub store: DictStore,
    /// Lines produced by commands, drained and printed by the caller.
    pub output: Vec<String>,
    depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and execute one line. `raw` may carry surrounding
    /// whitespace and a trailing newline.
    ///
    /// Classification is by leading character, in fixed priority order:
    /// `[` add, `:` command keyword, `%` get, `@` load, `!` quit; anything
    /// else is [`Outcome::NotCommand`].
    pub fn run_line(&mut self, raw: &str) -> Result<Outcome, RunError> {
        let line = raw.trim_ascii();
        let mut sc = Scanner::new(line);

        if sc.peek() == Some('[') {
            self.cmd_add(line)
        } else if sc.match_char(':') {
            self.dispatch_command(sc)
        } else if sc.match_char('%') {
            let reply = self.lookup_text(sc.rest());
            self.output.push(reply);
            Ok(Outcome::Handled)
        } else if sc.match_char('@') {
            self.cmd_load(sc.rest())
        } else if sc.match_char('!') {
            Ok(Outcome::Quit(parse_exit(sc.rest())))
        } else {
            Ok(Outcome::NotCommand)
        }
    }

    /// Keyword dispatch for `:` lines. Matching is longest-prefix, first
    /// match wins, in a fixed order; a bare `:` does nothing.
    fn dispatch_command(&mut self, mut sc: Scanner<'_>) -> Result<Outcome, RunError> {
        sc.skip_spaces();
        if sc.at_end() {
            return Ok(Outcome::Handled);
        }

        if sc.match_literal("add") || sc.peek() == Some('[') {
            self.cmd_add(sc.rest())
        } else if sc.match_literal("rem") {
            self.store.remove(sc.rest().trim_ascii());
            Ok(Outcome::Handled)
        } else if sc.match_literal("get") {
            let reply = self.lookup_text(sc.rest());
            self.output.push(reply);
            Ok(Outcome::Handled)
        } else if sc.match_literal("log") {
            self.cmd_log();
            Ok(Outcome::Handled)
        } else if sc.match_literal("msg") {
            self.output.push(sc.rest().trim_ascii().to_owned());
            Ok(Outcome::Handled)
        } else if sc.match_literal("help") {
            self.output.push(HELP_MESSAGE.to_owned());
            Ok(Outcome::Handled)
        } else if sc.match_literal("quit") {
            Ok(Outcome::Quit(parse_exit(sc.rest())))
        } else if sc.match_literal("load") {
            self.cmd_load(sc.rest())
        } else if sc.match_literal("save") {
            self.cmd_save(sc.rest());
            Ok(Outcome::Handled)
        } else if sc.match_literal("reld") {
            self.cmd_reload()
        } else {
            self.output.push("Error: Unknown command!".to_owned());
            Ok(Outcome::Handled)
        }
    }

    /// `add` / bracket literal: `[key; value]`.
    ///
    /// The `;` separator is mandatory; a line without one is rejected as a
    /// fatal input error. A value beginning with `%` is resolved against
    /// the current store once, at insertion time; the stored entry keeps no
    /// reference to the source key.
    fn cmd_add(&mut self, args: &str) -> Result<Outcome, RunError> {
        let mut sc = Scanner::new(args);
        sc.skip_spaces();
        sc.match_char('[');

        let key = sc.take_until(';').trim_ascii();
        if !sc.match_char(';') {
            return Err(RunError {
                message: "expected ';' at the end of a word".to_owned(),
            });
        }
        if key.is_empty() {
            self.output.push("Error: A word key cannot be empty!".to_owned());
            return Ok(Outcome::Handled);
        }

        // Text after a closing `]` is ignored.
        let candidate = sc.take_until(']').trim_ascii();
        let value = match candidate.strip_prefix('%') {
            Some(alias) => self.store.get_or_null(alias).to_owned(),
            None => candidate.to_owned(),
        };
        self.store.set(key, &value);
        Ok(Outcome::Handled)
    }

    /// `get` / `%` lookup: trim, drop one optional leading `%`, exact
    /// match with the `"<null>"` substitute.
    fn lookup_text(&self, args: &str) -> String {
        let key = args.trim_ascii();
        let key = key.strip_prefix('%').unwrap_or(key);
        self.store.get_or_null(key).to_owned()
    }

    /// `log`: one `(NN) [key; value]` line per entry, key-ascending.
    fn cmd_log(&mut self) {
        for (i, (key, value)) in self.store.iter().enumerate() {
            self.output.push(format!("({:02}) [{key}; {value}]", i + 1));
        }
    }

    /// `load` / `@`: run a file through the interpreter. A failure to open
    /// (or a blown depth ceiling) is reported on the output queue and the
    /// session continues; a fatal line inside the file propagates.
    fn cmd_load(&mut self, path: &str) -> Result<Outcome, RunError> {
        let path = path.trim_ascii().to_owned();
        match self.load_file(&path) {
            Ok(Some(exit)) => Ok(Outcome::Quit(exit)),
            Ok(None) => Ok(Outcome::Handled),
            Err(LoadError::Fatal(e)) => Err(e),
            Err(e) => {
                self.output.push(format!("Error: {path}: {e}."));
                Ok(Outcome::Handled)
            }
        }
    }

    /// Feed every line of `path` through [`Interpreter::run_line`]. Lines
    /// matching no directive are dropped, so a file of entries and a file
    /// of commands are the same thing. A `quit` directive stops reading and
    /// is handed back; the store keeps whatever the lines processed so far
    /// produced.
    pub fn load_file(&mut self, path: &str) -> Result<Option<Exit>, LoadError> {
        if self.depth >= MAX_LOAD_DEPTH {
            return Err(LoadError::TooDeep);
        }
        let file = File::open(path.trim_ascii()).map_err(LoadError::Io)?;
        self.depth += 1;
        let result = self.run_stream(BufReader::new(file));
        self.depth -= 1;
        result
    }

    fn run_stream(&mut self, mut reader: impl BufRead) -> Result<Option<Exit>, LoadError> {
        let mut line = String::new();
        loop {
            line.clear();
            match read_line_bounded(&mut reader, &mut line) {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(e) => return Err(LoadError::Io(e)),
            }
            match self.run_line(&line).map_err(LoadError::Fatal)? {
                Outcome::Quit(exit) => return Ok(Some(exit)),
                Outcome::Handled | Outcome::NotCommand => {}
            }
        }
    }

    /// `save`: serialize the store; an open failure is reported on the
    /// output queue and the session continues.
    fn cmd_save(&mut self, path: &str) {
        let path = path.trim_ascii();
        if let Err(e) = self.save_file(path) {
            self.output.push(format!("Error: {path}: {e}."));
        }
    }

    /// Write one `[key; value]` line per entry, key-ascending, overwriting
    /// any existing file. The result is itself a loadable script.
    pub fn save_file(&self, path: &str) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path.trim_ascii())?);
        for (key, value) in self.store.iter() {
            writeln!(out, "[{key}; {value}]")?;
        }
        out.flush()
    }

    /// `reld`: drop every entry and load the default dictionary again.
    fn cmd_reload(&mut self) -> Result<Outcome, RunError> {
        self.store.clear();
        self.cmd_load(DATA_FILE)
    }
}

// ── Parsing helpers ───────────────────────────────────────────────────────────

/// Parse `[code] [message]` for `quit` / `!`: an optional run of leading
/// decimal digits is the exit code (0 when absent or non-numeric, saturated
/// on overflow); any non-empty remainder is the farewell message.
fn parse_exit(args: &str) -> Exit {
    let trimmed = args.trim_ascii();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, rest) = trimmed.split_at(digits_end);
    let code = if digits.is_empty() {
        0
    } else {
        digits.parse::<i32>().unwrap_or(i32::MAX)
    };
    let message = rest.trim_ascii();
    Exit {
        code,
        message: (!message.is_empty()).then(|| message.to_owned()),
    }
}

/// Read one line of at most [`LINE_MAX`] bytes into `buf`. A longer line
/// is split at the bound; the remainder is returned by the next call.
/// Invalid UTF-8 is replaced rather than rejected. Returns the number of
/// bytes consumed (0 at end of input).
pub fn read_line_bounded(reader: &mut impl BufRead, buf: &mut String) -> io::Result<usize> {
    let mut bytes = Vec::new();
    let n = reader
        .by_ref()
        .take(LINE_MAX as u64)
        .read_until(b'\n', &mut bytes)?;
    buf.push_str(&String::from_utf8_lossy(&bytes));
    Ok(n)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
