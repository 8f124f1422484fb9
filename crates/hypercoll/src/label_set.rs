//! The ordered set of labels placed around the circle.

use indexmap::IndexSet;

use crate::error::HyperCollError;

/// An ordered, immutable sequence of unique labels.
///
/// The position of a label in the set is its *slot*. Slot `k` of `n` is
/// drawn at angle `k · 2π/n`, so the first label sits at angle 0 on the right
/// hand side of the diagram.
///
/// # Examples
///
/// ```
/// # use hypercoll::LabelSet;
/// let labels = LabelSet::new(["Austria", "Belgium", "Croatia"]).unwrap();
/// assert_eq!(labels.len(), 3);
/// assert_eq!(labels.index_of("Belgium"), Some(1));
/// assert_eq!(labels.slots(["Croatia", "Austria"]).unwrap(), vec![0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: IndexSet<String>,
}

impl LabelSet {
    /// Creates a label set, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`HyperCollError::EmptyLabelSet`] when no labels are given and
    /// [`HyperCollError::DuplicateLabel`] when a label repeats.
    pub fn new<I, L>(labels: I) -> Result<Self, HyperCollError>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let mut set = IndexSet::new();
        for label in labels {
            let label = label.into();
            if set.contains(&label) {
                return Err(HyperCollError::DuplicateLabel(label));
            }
            set.insert(label);
        }

        if set.is_empty() {
            return Err(HyperCollError::EmptyLabelSet);
        }
        Ok(Self { labels: set })
    }

    /// Returns the number of labels. Never zero.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; a label set holds at least one label.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the slot of `label`, if present.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// Returns the label at `slot`.
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.labels.get_index(slot).map(String::as_str)
    }

    /// Iterates over the labels in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Translates a collection of labels into its sorted slot indices.
    ///
    /// The result is independent of the order of `members`. An empty
    /// collection yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`HyperCollError::UnknownLabel`] for a label outside the set and
    /// [`HyperCollError::DuplicateMember`] for a label listed twice.
    pub fn slots<I, L>(&self, members: I) -> Result<Vec<usize>, HyperCollError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut slots = Vec::new();
        for member in members {
            let member = member.as_ref();
            let slot = self
                .index_of(member)
                .ok_or_else(|| HyperCollError::UnknownLabel(member.to_string()))?;
            if slots.contains(&slot) {
                return Err(HyperCollError::DuplicateMember(member.to_string()));
            }
            slots.push(slot);
        }
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let labels = LabelSet::new(["D", "A", "C"]).unwrap();
        let collected: Vec<_> = labels.iter().collect();
        assert_eq!(collected, ["D", "A", "C"]);
        assert_eq!(labels.get(0), Some("D"));
        assert_eq!(labels.get(3), None);
    }

    #[test]
    fn test_rejects_empty() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            LabelSet::new(empty),
            Err(HyperCollError::EmptyLabelSet)
        ));
    }

    #[test]
    fn test_rejects_duplicate_label() {
        let result = LabelSet::new(["A", "B", "A"]);
        assert!(matches!(result, Err(HyperCollError::DuplicateLabel(label)) if label == "A"));
    }

    #[test]
    fn test_slots_are_sorted() {
        let labels = LabelSet::new(["A", "B", "C", "D"]).unwrap();
        assert_eq!(labels.slots(["C", "A", "B"]).unwrap(), vec![0, 1, 2]);
        assert_eq!(labels.slots(["A", "B", "C"]).unwrap(), vec![0, 1, 2]);
        assert!(labels.slots(Vec::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_slots_reject_unknown_and_duplicate() {
        let labels = LabelSet::new(["A", "B"]).unwrap();
        assert!(matches!(
            labels.slots(["A", "Z"]),
            Err(HyperCollError::UnknownLabel(label)) if label == "Z"
        ));
        assert!(matches!(
            labels.slots(["B", "A", "B"]),
            Err(HyperCollError::DuplicateMember(label)) if label == "B"
        ));
    }
}
