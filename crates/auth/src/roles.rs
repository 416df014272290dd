use collegedesk_core::{RoleTag, Route};
use serde::Serialize;

use crate::capabilities::{COLLEGE_ADMIN_CAPABILITIES, DEPARTMENT_ADMIN_CAPABILITIES};
use crate::menu::{COLLEGE_ADMIN_MENU, DEPARTMENT_ADMIN_MENU};
use crate::palette::{COLLEGE_ADMIN_PALETTE, DEPARTMENT_ADMIN_PALETTE};
use crate::{Capability, MenuItem, Palette};

/// Static presentation and permission data for one role.
///
/// Derived purely from the role tag; never mutated, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleProfile {
    pub role: RoleTag,
    pub palette: Palette,
    pub menu: &'static [MenuItem],
    pub capabilities: &'static [Capability],
}

impl RoleProfile {
    pub fn allows(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c.as_str() == capability)
    }

    /// Landing page for this role (target of "redirect to default").
    pub fn default_route(&self) -> Route {
        Route::Dashboard
    }

    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|item| item.id == id)
    }
}

/// Profile for a known role.
pub fn resolve_role(role: RoleTag) -> RoleProfile {
    match role {
        RoleTag::CollegeAdmin => RoleProfile {
            role,
            palette: COLLEGE_ADMIN_PALETTE,
            menu: &COLLEGE_ADMIN_MENU,
            capabilities: &COLLEGE_ADMIN_CAPABILITIES,
        },
        RoleTag::DepartmentAdmin => RoleProfile {
            role,
            palette: DEPARTMENT_ADMIN_PALETTE,
            menu: &DEPARTMENT_ADMIN_MENU,
            capabilities: &DEPARTMENT_ADMIN_CAPABILITIES,
        },
    }
}

/// Profile for a raw role tag.
///
/// A missing or unrecognized tag resolves to the college admin profile.
pub fn resolve(tag: Option<&str>) -> RoleProfile {
    let role = match tag.map(str::parse::<RoleTag>) {
        Some(Ok(role)) => role,
        Some(Err(err)) => {
            tracing::debug!(error = %err, "falling back to college admin profile");
            RoleTag::CollegeAdmin
        }
        None => RoleTag::CollegeAdmin,
    };
    resolve_role(role)
}
