//! # Normalizer
//!
//! Turns an arbitrary list of rules into canonical form:
//!
//! 1. Every rule is validated (exactly one api group) and each of its
//!    resources is registered as a key, wildcard group rewritten first.
//! 2. Every verb of every rule is merged into the verb set of each key the
//!    rule names.
//! 3. Keys are sorted by (api group, resource), verbs within a key are
//!    sorted, and one output rule is emitted per key.
//!
//! Output depends only on which (group, resource, verb) triples occur in
//! the input, never on the order they were written in.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{SimplifyError, SimplifyResult};
use crate::key::{normalize_api_group, NormalizedKey};
use crate::rules::{OutputRule, Rule, RuleDocument};
use crate::verbs::VerbSet;

/// Accumulated verbs per key for one normalization run.
pub type WorkingTable = HashMap<NormalizedKey, VerbSet>;

/// Counters describing one normalization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Rules read from the input.
    pub input_rules: usize,
    /// Rules emitted after merging.
    pub output_rules: usize,
    /// Distinct (group, resource, verb) grants in the output.
    pub verbs_granted: usize,
}

/// Single-use normalizer owning the working table of one run.
///
/// # Example
///
/// ```
/// use rbac_simplify::normalizer::Normalizer;
/// use rbac_simplify::rules::Rule;
///
/// let rules = vec![
///     Rule::new(&["*"], &["pods"], &["list", "get"]),
///     Rule::new(&[""], &["pods"], &["watch"]),
/// ];
///
/// let output = Normalizer::new().run(&rules).unwrap();
/// assert_eq!(output.len(), 1);
/// assert_eq!(output[0].api_group, "");
/// assert_eq!(output[0].verbs, vec!["get", "list", "watch"]);
/// ```
#[derive(Debug, Default)]
pub struct Normalizer {
    table: WorkingTable,
    stats: NormalizeStats,
}

impl Normalizer {
    /// Create a normalizer with an empty working table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `rules`, consuming the normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`SimplifyError::ApiGroupCount`] if any rule does not name
    /// exactly one api group. No output is produced in that case.
    pub fn run(self, rules: &[Rule]) -> SimplifyResult<Vec<OutputRule>> {
        self.run_with_stats(rules).map(|(output, _)| output)
    }

    /// Normalize `rules`, also returning run counters.
    pub fn run_with_stats(
        mut self,
        rules: &[Rule],
    ) -> SimplifyResult<(Vec<OutputRule>, NormalizeStats)> {
        self.stats.input_rules = rules.len();

        let groups = self.discover(rules)?;
        self.merge(rules, &groups);
        let output = self.emit();

        debug!(
            input_rules = self.stats.input_rules,
            output_rules = self.stats.output_rules,
            verbs_granted = self.stats.verbs_granted,
            "normalized rule set"
        );
        Ok((output, self.stats))
    }

    /// Pass 1: validate every rule and register its keys.
    ///
    /// Returns the rewritten api group of each rule, by position.
    fn discover<'a>(&mut self, rules: &'a [Rule]) -> SimplifyResult<Vec<&'a str>> {
        let mut groups = Vec::with_capacity(rules.len());

        for (index, rule) in rules.iter().enumerate() {
            let group = match rule.api_groups.as_slice() {
                [group] => normalize_api_group(group),
                other => {
                    return Err(SimplifyError::ApiGroupCount {
                        index,
                        count: other.len(),
                    })
                }
            };

            for resource in &rule.resources {
                let key = NormalizedKey::new(group, resource.as_str());
                if let Entry::Vacant(slot) = self.table.entry(key) {
                    trace!(key = %slot.key(), rule = index, "new key");
                    slot.insert(VerbSet::new());
                }
            }
            groups.push(group);
        }

        debug!(rules = rules.len(), keys = self.table.len(), "discovered keys");
        Ok(groups)
    }

    /// Pass 2: merge every verb into the verb set of each key its rule names.
    fn merge(&mut self, rules: &[Rule], groups: &[&str]) {
        for (rule, group) in rules.iter().zip(groups) {
            for resource in &rule.resources {
                let key = NormalizedKey::new(*group, resource.as_str());
                // Registered in pass 1.
                if let Some(verbs) = self.table.get_mut(&key) {
                    verbs.extend(rule.verbs.iter().map(String::as_str));
                }
            }
        }
    }

    /// Sort keys and verbs, draining the working table.
    fn emit(&mut self) -> Vec<OutputRule> {
        let mut entries: Vec<(NormalizedKey, VerbSet)> = self.table.drain().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let output: Vec<OutputRule> = entries
            .into_iter()
            .map(|(key, verbs)| OutputRule::new(key, verbs.into_sorted_vec()))
            .collect();

        self.stats.output_rules = output.len();
        self.stats.verbs_granted = output.iter().map(|rule| rule.verbs.len()).sum();
        output
    }
}

/// Normalize a list of rules into canonical output rules.
pub fn normalize(rules: &[Rule]) -> SimplifyResult<Vec<OutputRule>> {
    Normalizer::new().run(rules)
}

/// Normalize a whole document, producing the canonical document.
///
/// # Example
///
/// ```
/// use rbac_simplify::normalizer::normalize_document;
/// use rbac_simplify::rules::{Rule, RuleDocument};
///
/// let doc = RuleDocument::new(vec![Rule::new(&[""], &["secrets", "pods"], &["get"])]);
/// let canonical = normalize_document(&doc).unwrap();
///
/// assert_eq!(canonical.rules[0].resources, vec!["pods"]);
/// assert_eq!(canonical.rules[1].resources, vec!["secrets"]);
/// ```
pub fn normalize_document(document: &RuleDocument) -> SimplifyResult<RuleDocument> {
    normalize(&document.rules).map(RuleDocument::from_output)
}
