use collegedesk_core::Route;
use serde::Serialize;

/// One entry of the sidebar navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    /// Icon name understood by the shell's icon set.
    pub icon: &'static str,
    pub route: Route,
}

impl MenuItem {
    pub fn path(&self) -> &'static str {
        self.route.path()
    }
}

const DASHBOARD: MenuItem = MenuItem {
    id: "dashboard",
    label: "Dashboard",
    icon: "dashboard",
    route: Route::Dashboard,
};

const STUDENT_MANAGEMENT: MenuItem = MenuItem {
    id: "student-management",
    label: "Student Management",
    icon: "school",
    route: Route::StudentManagement,
};

pub(crate) static COLLEGE_ADMIN_MENU: [MenuItem; 3] = [
    DASHBOARD,
    MenuItem {
        id: "admin-management",
        label: "Admin Management",
        icon: "admin_panel_settings",
        route: Route::AdminManagement,
    },
    STUDENT_MANAGEMENT,
];

pub(crate) static DEPARTMENT_ADMIN_MENU: [MenuItem; 3] = [
    DASHBOARD,
    STUDENT_MANAGEMENT,
    MenuItem {
        id: "profile-approval",
        label: "Profile Approval",
        icon: "how_to_reg",
        route: Route::ProfileApproval,
    },
];
