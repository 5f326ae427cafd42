//! Repeatable command-line flag values

/// Values collected from a flag that may be given more than once.
///
/// Every occurrence is kept in command-line order so the whole list can be
/// forwarded to protoc, which resolves repeated flags to their last
/// occurrence. [`RepeatedFlag::effective`] applies the same rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatedFlag(Vec<String>);

impl RepeatedFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record another occurrence of the flag
    pub fn push(&mut self, value: impl Into<String>) {
        self.0.push(value.into());
    }

    /// True when the flag was never given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The value that takes effect: the last occurrence, or `""` if none
    pub fn effective(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// All occurrences in original order
    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for RepeatedFlag {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl<S: Into<String>> FromIterator<S> for RepeatedFlag {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
