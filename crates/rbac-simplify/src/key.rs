//! # Normalized Keys
//!
//! A normalized key identifies one (api group, resource) pair. Keys are the
//! unit of accumulation during normalization: every verb granted anywhere in
//! the input lands in the verb set of exactly one key.

use std::fmt;

/// Api group literal that stands for "all groups" in rule input.
pub const WILDCARD_API_GROUP: &str = "*";

/// The core api group, written as the empty string.
pub const CORE_API_GROUP: &str = "";

/// Rewrite the wildcard api group to the core group.
///
/// Any other group is returned unchanged. A literal empty string and `*`
/// therefore end up as the same group.
///
/// # Example
///
/// ```
/// use rbac_simplify::key::normalize_api_group;
///
/// assert_eq!(normalize_api_group("*"), "");
/// assert_eq!(normalize_api_group("apps"), "apps");
/// ```
pub fn normalize_api_group(group: &str) -> &str {
    if group == WILDCARD_API_GROUP {
        CORE_API_GROUP
    } else {
        group
    }
}

/// Composite identity of an (api group, resource) pair.
///
/// The derived ordering compares `api_group` first and `resource` second,
/// so `("", "pods")` sorts before `("apps", "deployments")` regardless of how
/// the two strings would compare when concatenated.
///
/// # Example
///
/// ```
/// use rbac_simplify::key::NormalizedKey;
///
/// let pods = NormalizedKey::new("*", "pods");
/// assert_eq!(pods.api_group, "");
/// assert_eq!(pods.to_string(), "core/pods");
///
/// let deployments = NormalizedKey::new("apps", "deployments");
/// assert!(pods < deployments);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey {
    /// The api group, after wildcard rewriting.
    pub api_group: String,
    /// The resource name.
    pub resource: String,
}

impl NormalizedKey {
    /// Create a key, rewriting a wildcard api group to the core group.
    pub fn new(api_group: impl AsRef<str>, resource: impl Into<String>) -> Self {
        Self {
            api_group: normalize_api_group(api_group.as_ref()).to_string(),
            resource: resource.into(),
        }
    }

    /// Check if this key belongs to the core api group.
    pub fn is_core(&self) -> bool {
        self.api_group == CORE_API_GROUP
    }
}

impl fmt::Display for NormalizedKey {
    /// Renders `group/resource`, with the core group shown as `core`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_core() {
            write!(f, "core/{}", self.resource)
        } else {
            write!(f, "{}/{}", self.api_group, self.resource)
        }
    }
}
