use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use collegedesk_core::RoleTag;
use serde::{Deserialize, Serialize};

use crate::resolve_role;

/// Named permission a role may hold (e.g. "admin_management").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    pub const DASHBOARD: Capability = Capability::from_static("dashboard");
    pub const STUDENT_MANAGEMENT: Capability = Capability::from_static("student_management");
    pub const ADMIN_MANAGEMENT: Capability = Capability::from_static("admin_management");
    pub const DEPARTMENT_MANAGEMENT: Capability = Capability::from_static("department_management");
    pub const PROFILE_APPROVAL: Capability = Capability::from_static("profile_approval");
    pub const NOTIFICATIONS: Capability = Capability::from_static("notifications");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capabilities granted to college administrators.
pub(crate) static COLLEGE_ADMIN_CAPABILITIES: [Capability; 5] = [
    Capability::DASHBOARD,
    Capability::STUDENT_MANAGEMENT,
    Capability::ADMIN_MANAGEMENT,
    Capability::DEPARTMENT_MANAGEMENT,
    Capability::NOTIFICATIONS,
];

/// Capabilities granted to department administrators.
pub(crate) static DEPARTMENT_ADMIN_CAPABILITIES: [Capability; 4] = [
    Capability::DASHBOARD,
    Capability::STUDENT_MANAGEMENT,
    Capability::PROFILE_APPROVAL,
    Capability::NOTIFICATIONS,
];

/// Every capability some role grants, with the roles that grant it.
///
/// This is the complete view used to tell a *known* capability that a role
/// lacks apart from a name nobody has ever declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRegistry {
    grants: BTreeMap<Capability, Vec<RoleTag>>,
}

impl CapabilityRegistry {
    /// Build the registry from the role profiles.
    pub fn standard() -> Self {
        let mut grants: BTreeMap<Capability, Vec<RoleTag>> = BTreeMap::new();
        for role in RoleTag::ALL {
            for capability in resolve_role(role).capabilities {
                grants.entry(capability.clone()).or_default().push(role);
            }
        }
        Self { grants }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.grants.keys().any(|c| c.as_str() == name)
    }

    /// Roles holding `name`; empty for undeclared names.
    pub fn granted_to(&self, name: &str) -> &[RoleTag] {
        self.grants
            .iter()
            .find(|(c, _)| c.as_str() == name)
            .map(|(_, roles)| roles.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.grants.keys()
    }
}

static REGISTRY: LazyLock<CapabilityRegistry> = LazyLock::new(CapabilityRegistry::standard);

/// The process-wide registry, built on first use.
pub fn registry() -> &'static CapabilityRegistry {
    &REGISTRY
}

/// Whether `role` may use the capability called `name`.
///
/// Names that no role declares are treated as shared resources and allowed.
pub fn capability_allowed(role: RoleTag, name: &str) -> bool {
    if !registry().contains(name) {
        tracing::debug!(role = %role, capability = name, "undeclared capability, allowing");
        return true;
    }
    resolve_role(role).allows(name)
}
