use std::collections::BTreeSet;

/// Names the user has marked for a targeted export.
///
/// Each card is either unselected or selected; toggling is the only transition. Cards with equal
/// names share one entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: BTreeSet<String>,
}

impl SelectionSet {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `name`. Returns `true` if it is selected afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_owned());
            true
        }
    }

    /// Whether `name` is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of selected names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Selected names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Drop entries whose name is not in `present`. Returns how many were dropped.
    pub fn retain_present<'a>(&mut self, present: impl IntoIterator<Item = &'a str>) -> usize {
        let present: BTreeSet<&str> = present.into_iter().collect();
        let before = self.names.len();
        self.names.retain(|n| present.contains(n.as_str()));
        before - self.names.len()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
