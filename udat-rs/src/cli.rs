//! Command-line argument parsing.
//!
//! Usage:
//!   udat [<file>...]
//!
//! Each positional argument is a dictionary or script file loaded at
//! startup, in order, in place of the default assets file.

use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Files to load at startup, in order.
    pub files: Vec<PathBuf>,
}

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(&raw[1..])
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends option processing; everything after is a file path.
        if arg == "--" {
            i += 1;
            args.files.extend(argv[i..].iter().map(PathBuf::from));
            break;
        }

        // A bare `-` is a filename; anything else starting with `-` is not
        // an option this tool has.
        if arg.starts_with('-') && arg != "-" {
            return Err(format!("unknown option: {arg}"));
        }

        args.files.push(PathBuf::from(arg));
        i += 1;
    }

    Ok(args)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn empty_args() {
        let a = parse_argv(&argv(&[])).unwrap();
        assert!(a.files.is_empty());
    }

    #[test]
    fn positional_files_in_order() {
        let a = parse_argv(&argv(&["first.dat", "second.dat"])).unwrap();
        assert_eq!(a.files, [PathBuf::from("first.dat"), PathBuf::from("second.dat")]);
    }

    #[test]
    fn double_dash_ends_option_processing() {
        let a = parse_argv(&argv(&["--", "-weird-name.dat"])).unwrap();
        assert_eq!(a.files, [PathBuf::from("-weird-name.dat")]);
    }

    #[test]
    fn bare_dash_is_a_filename() {
        let a = parse_argv(&argv(&["-"])).unwrap();
        assert_eq!(a.files, [PathBuf::from("-")]);
    }

    #[test]
    fn unknown_option_is_an_error() {
        assert!(parse_argv(&argv(&["-z"])).is_err());
        assert!(parse_argv(&argv(&["--verbose"])).is_err());
    }
}
