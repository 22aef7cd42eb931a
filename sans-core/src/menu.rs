/// A menu entry backed by a `gio` action, with its default accelerators.
pub struct MenuAction {
    /// Fully qualified action name, e.g. `win.reload`.
    pub action: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub accels: &'static [&'static str],
}

pub const MENU_ACTIONS: &[MenuAction] = &[
    // File
    MenuAction {
        action: "win.open",
        label: "_Open…",
        section: "File",
        accels: &["<Ctrl>o"],
    },
    MenuAction {
        action: "app.quit",
        label: "_Quit",
        section: "File",
        accels: &["<Ctrl>q"],
    },
    // View
    MenuAction {
        action: "win.reload",
        label: "_Reload",
        section: "View",
        accels: &["F5", "<Ctrl>r"],
    },
    MenuAction {
        action: "win.inspect",
        label: "Developer _Tools",
        section: "View",
        accels: &["F12", "<Ctrl><Shift>i"],
    },
    // Help
    MenuAction {
        action: "app.about",
        label: "_About",
        section: "Help",
        accels: &[],
    },
];

/// Section names in display order.
pub fn sections() -> Vec<&'static str> {
    let mut sections: Vec<&'static str> = Vec::new();
    for entry in MENU_ACTIONS {
        if !sections.contains(&entry.section) {
            sections.push(entry.section);
        }
    }
    sections
}

pub fn actions_in(section: &str) -> impl Iterator<Item = &'static MenuAction> + '_ {
    MENU_ACTIONS.iter().filter(move |a| a.section == section)
}
