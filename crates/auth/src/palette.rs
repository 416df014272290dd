use serde::Serialize;

/// Role accent colors (CSS hex strings) used by the shell's theme.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub light: &'static str,
    pub main: &'static str,
    pub dark: &'static str,
}

pub(crate) const COLLEGE_ADMIN_PALETTE: Palette = Palette {
    light: "#E3F2FD",
    main: "#1976D2",
    dark: "#0D47A1",
};

pub(crate) const DEPARTMENT_ADMIN_PALETTE: Palette = Palette {
    light: "#E8F5E9",
    main: "#388E3C",
    dark: "#1B5E20",
};
