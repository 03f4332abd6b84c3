use serde::{Deserialize, Serialize};

/// An ordered list of short selling points shown on a package or offer card.
///
/// Order is meaningful for display and is preserved across every edit.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighlightList(Vec<String>);

impl HighlightList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a highlight. Blank input is ignored and reported as `false`.
    pub fn push(&mut self, highlight: impl Into<String>) -> bool {
        let highlight = highlight.into();
        let trimmed = highlight.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.0.push(trimmed.to_string());
        true
    }

    /// Replaces the highlight at `index`. Returns `false` when out of range or blank.
    pub fn replace(&mut self, index: usize, highlight: impl Into<String>) -> bool {
        let highlight = highlight.into();
        let trimmed = highlight.trim();
        match self.0.get_mut(index) {
            Some(slot) if !trimmed.is_empty() => {
                *slot = trimmed.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HighlightList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = HighlightList::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}
