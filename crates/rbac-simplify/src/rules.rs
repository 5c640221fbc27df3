//! # Rules
//!
//! Wire shapes of a rule document and the canonical rule produced by
//! normalization.
//!
//! ```text
//! rules:
//!   - apiGroups: [""]
//!     resources: ["pods", "secrets"]
//!     verbs: ["get", "list"]
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::key::NormalizedKey;

/// A single grant statement as it appears in a rule document.
///
/// Absent or `null` lists read as empty, and a `null` entry inside a list
/// reads as the empty string, so `apiGroups: [~]` names the core group.
/// Keys other than `apiGroups`, `resources` and `verbs` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Api groups the rule applies to. Normalization requires exactly one.
    #[serde(default, deserialize_with = "nullable_list")]
    pub api_groups: Vec<String>,
    /// Resources the rule grants access to.
    #[serde(default, deserialize_with = "nullable_list")]
    pub resources: Vec<String>,
    /// Verbs granted on every listed resource.
    #[serde(default, deserialize_with = "nullable_list")]
    pub verbs: Vec<String>,
}

impl Rule {
    /// Create a rule from string slices.
    ///
    /// # Example
    ///
    /// ```
    /// use rbac_simplify::rules::Rule;
    ///
    /// let rule = Rule::new(&["apps"], &["deployments"], &["get", "list"]);
    /// assert_eq!(rule.api_groups, vec!["apps"]);
    /// assert_eq!(rule.verbs.len(), 2);
    /// ```
    pub fn new(api_groups: &[&str], resources: &[&str], verbs: &[&str]) -> Self {
        Self {
            api_groups: to_owned_list(api_groups),
            resources: to_owned_list(resources),
            verbs: to_owned_list(verbs),
        }
    }
}

/// A rule document: an ordered list of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    /// The rules, in document order.
    #[serde(default, deserialize_with = "nullable_list")]
    pub rules: Vec<Rule>,
}

impl RuleDocument {
    /// Create a document from a list of rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build the canonical document from normalized output.
    pub fn from_output(output: Vec<OutputRule>) -> Self {
        Self {
            rules: output.into_iter().map(Rule::from).collect(),
        }
    }

    /// Get the count of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One merged rule in canonical form: a single group, a single resource and
/// the sorted verbs granted on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRule {
    /// The api group (core group is `""`).
    pub api_group: String,
    /// The resource.
    pub resource: String,
    /// Verbs in ascending order, without duplicates.
    pub verbs: Vec<String>,
}

impl OutputRule {
    /// Create an output rule from a key and its already sorted verbs.
    pub fn new(key: NormalizedKey, verbs: Vec<String>) -> Self {
        Self {
            api_group: key.api_group,
            resource: key.resource,
            verbs,
        }
    }
}

impl From<OutputRule> for Rule {
    fn from(rule: OutputRule) -> Self {
        Self {
            api_groups: vec![rule.api_group],
            resources: vec![rule.resource],
            verbs: rule.verbs,
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}
