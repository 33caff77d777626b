use std::io::{self, Write};
use std::process;

use udat::cli;
use udat::interp::{read_line_bounded, Exit, Interpreter, Outcome, DATA_FILE};
use udat::translate::translate_or_unknown;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("udat: {e}");
            eprintln!("Usage: udat [<file>...]");
            process::exit(1);
        }
    };

    let mut interp = Interpreter::new();

    // ── Startup dictionaries ──────────────────────────────────────────────────
    // The command-line files in order, or the default assets when none were
    // given. Any failure here is fatal; a quit directive inside a startup
    // file is honored.
    let startup: Vec<String> = if args.files.is_empty() {
        vec![DATA_FILE.to_owned()]
    } else {
        args.files.iter().map(|p| p.display().to_string()).collect()
    };
    for path in &startup {
        match interp.load_file(path) {
            Ok(None) => {}
            Ok(Some(exit)) => {
                flush_output(&mut interp);
                finish(exit);
            }
            Err(e) => {
                flush_output(&mut interp);
                eprintln!("udat: {path}: {e}");
                process::exit(1);
            }
        }
    }
    flush_output(&mut interp);

    println!("udat {}, to get help type :help", env!("CARGO_PKG_VERSION"));

    // ── Prompt loop ───────────────────────────────────────────────────────────
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    loop {
        print!("\nTranslate >> ");
        let _ = io::stdout().flush();

        line.clear();
        match read_line_bounded(&mut reader, &mut line) {
            Ok(0) => break, // end of input ends the session
            Ok(_) => {}
            Err(e) => {
                eprintln!("udat: stdin: {e}");
                process::exit(1);
            }
        }

        match interp.run_line(&line) {
            Ok(Outcome::Handled) => flush_output(&mut interp),
            Ok(Outcome::NotCommand) => {
                // A line that is no directive is a translation query; only
                // the interactive caller answers it (file-sourced lines are
                // dropped by the loader).
                flush_output(&mut interp);
                println!("{}", translate_or_unknown(&interp.store, line.trim_ascii()));
            }
            Ok(Outcome::Quit(exit)) => {
                flush_output(&mut interp);
                finish(exit);
            }
            Err(e) => {
                flush_output(&mut interp);
                eprintln!("udat: {e}");
                process::exit(1);
            }
        }
    }

    println!();
}

/// Print and clear whatever output the interpreter queued.
fn flush_output(interp: &mut Interpreter) {
    for msg in interp.output.drain(..) {
        println!("{msg}");
    }
}

/// Print the farewell and end the process with the requested code.
fn finish(exit: Exit) -> ! {
    match exit.message {
        Some(msg) => println!("\n{msg}"),
        None => println!("\nBye!"),
    }
    process::exit(exit.code);
}
