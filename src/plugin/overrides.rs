//! Per-buffer language overrides

use std::collections::HashMap;

use super::host::BufferId;

/// Languages picked by hand for individual buffers
///
/// An entry wins over file name resolution until the buffer is closed or its
/// language is changed some other way.
#[derive(Debug, Clone, Default)]
pub struct BufferOverrides {
    languages: HashMap<BufferId, String>,
}

impl BufferOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `language` for `buffer`, replacing any previous choice
    pub fn set(&mut self, buffer: BufferId, language: impl Into<String>) {
        self.languages.insert(buffer, language.into());
    }

    pub fn get(&self, buffer: BufferId) -> Option<&str> {
        self.languages.get(&buffer).map(String::as_str)
    }

    /// Forget the override for `buffer`, returning it if there was one
    pub fn remove(&mut self, buffer: BufferId) -> Option<String> {
        self.languages.remove(&buffer)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut overrides = BufferOverrides::new();
        assert!(overrides.is_empty());

        overrides.set(BufferId(42), "lua");
        assert_eq!(overrides.get(BufferId(42)), Some("lua"));
        assert_eq!(overrides.get(BufferId(7)), None);

        assert_eq!(overrides.remove(BufferId(42)), Some("lua".to_string()));
        assert_eq!(overrides.get(BufferId(42)), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut overrides = BufferOverrides::new();
        overrides.set(BufferId(1), "lua");
        overrides.set(BufferId(1), "python");

        assert_eq!(overrides.get(BufferId(1)), Some("python"));
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut overrides = BufferOverrides::new();
        overrides.set(BufferId(1), "lua");

        assert_eq!(overrides.remove(BufferId(2)), None);
        assert_eq!(overrides.len(), 1);
    }
}
