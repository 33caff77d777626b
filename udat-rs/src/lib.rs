//! udat: a line-oriented, bidirectional word-translation dictionary.
//!
//! The crate keeps an ordered word dictionary and interprets one directive
//! per line. A line starting with a sigil (`[`, `:`, `%`, `@`, `!`) is a
//! command; any other line is a translation query matched against both
//! sides of every entry, ignoring ASCII case. Files are scripts: the
//! loader feeds each of their lines through the same entry point used for
//! typed input, so a saved dictionary and a command script are the same
//! thing.
//!
//! ```rust
//! use udat::interp::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! interp.run_line("[Hello; Ciao]").unwrap();
//! interp.run_line(":get Hello").unwrap();
//! assert_eq!(interp.output, vec!["Ciao"]);
//! ```

pub mod cli;
pub mod interp;
pub mod scan;
pub mod store;
pub mod translate;
