//! Tests for resolving file names against language patterns
use lpeg_binder::{Settings, matches_wild, resolve};

#[test]
fn test_first_listed_language_wins() {
    let settings = Settings::parse("header = *.h\nansi_c = *.c;*.h\ncpp = *.h;*.cpp\n");

    assert_eq!(resolve("stdio.h", &settings), Some("header"));
    assert_eq!(resolve("main.c", &settings), Some("ansi_c"));
    assert_eq!(resolve("main.cpp", &settings), Some("cpp"));
}

#[test]
fn test_suffix_patterns_match_any_stem() {
    for name in ["a.py", "setup.py", "with space.py", "x.y.py", ".py"] {
        assert!(matches_wild("*.py", name, true), "{name} should match");
    }
    for name in ["py", "a.pyc", "a.PY", "a_py"] {
        assert!(!matches_wild("*.py", name, true), "{name} should not match");
    }
}

#[test]
fn test_prefix_patterns_match_any_tail() {
    for name in ["Makefile", "Makefile.am", "Makefile.in"] {
        assert!(matches_wild("Makefile*", name, true), "{name} should match");
    }
    assert!(!matches_wild("Makefile*", "GNUmakefile", true));
}

#[test]
fn test_case_insensitive_matching() {
    assert!(matches_wild("*.PY", "foo.py", false));
    assert!(matches_wild("makefile", "Makefile", false));
    assert!(!matches_wild("makefile", "Makefile", true));
}

#[test]
fn test_resolution_is_case_sensitive() {
    let settings = Settings::parse("python = *.py\nmakefile = Makefile\n");

    assert_eq!(resolve("FOO.PY", &settings), None);
    assert_eq!(resolve("makefile", &settings), None);
}

#[test]
fn test_only_file_names_are_matched() {
    let settings = Settings::parse("python = *.py\n");

    assert_eq!(resolve("", &settings), None);
    assert_eq!(resolve("foo.py.bak", &settings), None);
}
