//! Language resolution by file name

use super::pattern::matches_wild;
use super::settings::Settings;

/// Find the language whose patterns match `file_name`.
///
/// Languages are tried in settings file order and the first one with any
/// matching pattern wins, even when a later language has a more specific
/// pattern.
pub fn resolve<'a>(file_name: &str, settings: &'a Settings) -> Option<&'a str> {
    settings
        .languages()
        .iter()
        .find(|(_, patterns)| {
            patterns
                .iter()
                .any(|pattern| matches_wild(pattern, file_name, true))
        })
        .map(|(language, _)| language.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_pattern() {
        let settings = Settings::parse("python = *.py;*.pyw\n");
        assert_eq!(resolve("foo.py", &settings), Some("python"));
        assert_eq!(resolve("foo.pyw", &settings), Some("python"));
        assert_eq!(resolve("foo.rs", &settings), None);
    }

    #[test]
    fn test_exact_pattern() {
        let settings = Settings::parse("make = Makefile;*.mk\n");
        assert_eq!(resolve("Makefile", &settings), Some("make"));
        assert_eq!(resolve("rules.mk", &settings), Some("make"));
    }

    #[test]
    fn test_first_language_wins() {
        let settings = Settings::parse("text = *\npython = *.py\n");
        assert_eq!(resolve("foo.py", &settings), Some("text"));

        let settings = Settings::parse("python = *.py\ntext = *\n");
        assert_eq!(resolve("foo.py", &settings), Some("python"));
    }

    #[test]
    fn test_case_sensitive() {
        let settings = Settings::parse("python = *.py\n");
        assert_eq!(resolve("FOO.PY", &settings), None);
    }

    #[test]
    fn test_empty_settings() {
        let settings = Settings::new();
        assert_eq!(resolve("anything", &settings), None);
        assert_eq!(resolve("", &settings), None);
    }
}
