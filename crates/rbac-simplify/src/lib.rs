//! # RBAC Simplify
//!
//! Canonicalization of Kubernetes-style RBAC rule lists.
//!
//! ## Overview
//!
//! A rule grants a list of verbs on a list of resources within one api
//! group. Real role manifests tend to grow by accretion: the same resource
//! shows up in several rules, verbs repeat, and order drifts between
//! revisions. This crate rewrites such a list into a canonical form:
//!
//! - **One rule per (api group, resource)** pair
//! - **Verbs merged** across every rule naming that pair
//! - **Deterministic order**: rules by api group then resource, verbs
//!   lexicographically
//!
//! Semantically identical inputs always render to byte-identical output.
//!
//! ## Architecture
//!
//! ```text
//! RuleDocument ──► Normalizer ──► Vec<OutputRule> ──► RuleDocument
//!   (load)        discover keys      sorted keys        (render)
//!                 merge verbs        sorted verbs
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use rbac_simplify::{normalize_document, RuleDocument};
//!
//! let input = RuleDocument::from_yaml_str(r#"
//! rules:
//!   - apiGroups: ["*"]
//!     resources: ["pods"]
//!     verbs: ["get", "list"]
//!   - apiGroups: [""]
//!     resources: ["pods", "secrets"]
//!     verbs: ["list", "watch"]
//! "#).unwrap();
//!
//! let canonical = normalize_document(&input).unwrap();
//! assert_eq!(canonical.rules.len(), 2);
//! assert_eq!(canonical.rules[0].verbs, vec!["get", "list", "watch"]);
//! ```
//!
//! ## Api Groups
//!
//! Each rule must name exactly one api group; anything else is rejected.
//! The wildcard group `*` is rewritten to the core group `""` before keys
//! are built, so the two always merge.

pub mod document;
pub mod error;
pub mod key;
pub mod normalizer;
pub mod rules;
pub mod verbs;

// Re-export main types for convenience
pub use document::OutputFormat;
pub use error::{SimplifyError, SimplifyResult};
pub use key::NormalizedKey;
pub use normalizer::{normalize, normalize_document, NormalizeStats, Normalizer};
pub use rules::{OutputRule, Rule, RuleDocument};
pub use verbs::VerbSet;
