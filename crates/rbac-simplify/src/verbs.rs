//! # Verb Sets
//!
//! Set of verbs granted on one normalized key. Membership is all that
//! matters while rules are being merged; ordering is imposed only when the
//! set is turned into output.

use std::collections::HashSet;

/// A set of verb names.
///
/// # Example
///
/// ```
/// use rbac_simplify::verbs::VerbSet;
///
/// let mut set = VerbSet::new();
/// assert!(set.insert("list"));
/// assert!(set.insert("get"));
/// assert!(!set.insert("list"));
///
/// assert_eq!(set.to_sorted_vec(), vec!["get", "list"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerbSet {
    verbs: HashSet<String>,
}

impl VerbSet {
    /// Create a new empty verb set.
    pub fn new() -> Self {
        Self {
            verbs: HashSet::new(),
        }
    }

    /// Add a verb to the set.
    ///
    /// # Returns
    ///
    /// `true` if the verb was not present before, `false` otherwise
    pub fn insert(&mut self, verb: impl Into<String>) -> bool {
        self.verbs.insert(verb.into())
    }

    /// Get the count of verbs.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Consume the set, returning its verbs in ascending lexicographic order.
    pub fn into_sorted_vec(self) -> Vec<String> {
        let mut verbs: Vec<String> = self.verbs.into_iter().collect();
        verbs.sort();
        verbs
    }

    /// Return the verbs in ascending lexicographic order.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.clone().into_sorted_vec()
    }
}

impl<S: Into<String>> FromIterator<S> for VerbSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = VerbSet::new();
        for verb in iter {
            set.insert(verb);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for VerbSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for verb in iter {
            self.insert(verb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = VerbSet::new();
        assert!(set.insert("get"));
        assert!(!set.insert("get"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.to_sorted_vec(), vec!["get"]);
    }

    #[test]
    fn test_sorted_output() {
        let set: VerbSet = ["watch", "get", "list", "create"].into_iter().collect();
        assert_eq!(set.to_sorted_vec(), vec!["create", "get", "list", "watch"]);
    }

    #[test]
    fn test_sort_is_bytewise() {
        // Uppercase sorts before lowercase, `*` before letters.
        let set: VerbSet = ["list", "Get", "*"].into_iter().collect();
        assert_eq!(set.into_sorted_vec(), vec!["*", "Get", "list"]);
    }

    #[test]
    fn test_extend_is_union() {
        let mut set: VerbSet = ["get", "list"].into_iter().collect();
        set.extend(["list", "watch"]);
        assert_eq!(set.to_sorted_vec(), vec!["get", "list", "watch"]);
    }

    #[test]
    fn test_extend() {
        let mut set = VerbSet::new();
        set.extend(vec!["get".to_string(), "get".to_string()]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty() {
        let set = VerbSet::new();
        assert!(set.is_empty());
        assert!(set.to_sorted_vec().is_empty());
    }
}
