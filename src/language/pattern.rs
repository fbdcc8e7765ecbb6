//! File name patterns
//!
//! A pattern is an exact file name, or a name with a single `*` at the very
//! start (suffix match) or at the very end (prefix match).

/// Match `file_name` against `pattern`, allowing a leading or trailing `*`.
///
/// An equal-length literal comparison is tried first; when it fails the
/// wildcard forms are still considered, so `*.py` matches `a.py`. A `*`
/// anywhere else in the pattern is compared literally. Case-insensitive
/// comparison only folds ASCII letters.
pub fn matches_wild(pattern: &str, file_name: &str, case_sensitive: bool) -> bool {
    let pattern = pattern.as_bytes();
    let name = file_name.as_bytes();

    if pattern.is_empty() {
        return false;
    }

    if pattern.len() == name.len() && bytes_equal(pattern, name, case_sensitive) {
        return true;
    }

    if name.len() >= pattern.len() - 1 {
        if let Some(suffix) = pattern.strip_prefix(b"*") {
            return bytes_equal(suffix, &name[name.len() - suffix.len()..], case_sensitive);
        } else if let Some(prefix) = pattern.strip_suffix(b"*") {
            return bytes_equal(prefix, &name[..prefix.len()], case_sensitive);
        }
    }

    false
}

fn bytes_equal(a: &[u8], b: &[u8], case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}
