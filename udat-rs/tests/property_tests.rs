use proptest::prelude::*;

use udat::interp::Interpreter;
use udat::scan::Scanner;
use udat::store::{DictStore, NULL_TEXT};
use udat::translate::translate;

/// A plain word: no sigils, separators, or whitespace.
fn word() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,11}"
}

proptest! {
    /// Setting a pair and reading it back by key returns the value.
    #[test]
    fn set_then_get_returns_the_value(key in word(), value in word()) {
        let mut store = DictStore::new();
        store.set(&key, &value);
        prop_assert_eq!(store.get(&key), Some(value.as_str()));
    }
}

proptest! {
    /// Removing a key makes it absent; the lookup substitute is the
    /// `<null>` sentinel.
    #[test]
    fn remove_then_get_returns_null(key in word(), value in word()) {
        let mut store = DictStore::new();
        store.set(&key, &value);
        store.remove(&key);
        prop_assert_eq!(store.get_or_null(&key), NULL_TEXT);
    }
}

proptest! {
    /// Translation is symmetric and ignores ASCII case on both sides.
    #[test]
    fn translate_is_symmetric_and_case_insensitive(key in word(), value in word()) {
        prop_assume!(!key.eq_ignore_ascii_case(&value));
        let mut store = DictStore::new();
        store.set(&key, &value);
        prop_assert_eq!(translate(&store, &key.to_uppercase()), Some(value.as_str()));
        prop_assert_eq!(translate(&store, &value.to_uppercase()), Some(key.as_str()));
        prop_assert_eq!(translate(&store, &key.to_lowercase()), Some(value.as_str()));
        prop_assert_eq!(translate(&store, &value.to_lowercase()), Some(key.as_str()));
    }
}

proptest! {
    /// Saving a store and loading the file back reproduces the same pairs
    /// in the same key order.
    #[test]
    fn save_then_load_reproduces_the_store(
        pairs in proptest::collection::btree_map(word(), word(), 0..8)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.dat").display().to_string();

        let mut first = Interpreter::new();
        for (k, v) in &pairs {
            first.store.set(k, v);
        }
        first.save_file(&path).unwrap();

        let mut second = Interpreter::new();
        second.load_file(&path).unwrap();

        let a: Vec<(&str, &str)> = first.store.iter().collect();
        let b: Vec<(&str, &str)> = second.store.iter().collect();
        prop_assert_eq!(a, b);
    }
}

proptest! {
    /// The line processor never panics on arbitrary input; it returns
    /// either an outcome or a (fatal) error. Lines that would touch the
    /// filesystem are excluded.
    #[test]
    fn run_line_does_not_panic(s in "\\PC*") {
        let t = s.trim_ascii();
        prop_assume!(!t.starts_with('@'));
        if let Some(rest) = t.strip_prefix(':') {
            let cmd = rest.trim_ascii_start();
            prop_assume!(!cmd.starts_with("load"));
            prop_assume!(!cmd.starts_with("save"));
            prop_assume!(!cmd.starts_with("reld"));
        }
        let mut interp = Interpreter::new();
        let _ = interp.run_line(&s);
    }
}

proptest! {
    /// A scanner walk always terminates with the cursor at the end, and
    /// the characters it yields are exactly the input's.
    #[test]
    fn scanner_walk_covers_the_input(s in "\\PC*") {
        let mut sc = Scanner::new(&s);
        let mut collected = String::new();
        while let Some(ch) = sc.advance() {
            collected.push(ch);
        }
        prop_assert!(sc.at_end());
        prop_assert_eq!(collected, s);
    }
}

proptest! {
    /// `take_until` plus the rest of the line always re-assembles the
    /// scanned input.
    #[test]
    fn take_until_splits_without_loss(s in "\\PC*") {
        let mut sc = Scanner::new(&s);
        let head = sc.take_until(';').to_owned();
        let tail = sc.rest().to_owned();
        prop_assert_eq!(format!("{head}{tail}"), s);
    }
}
