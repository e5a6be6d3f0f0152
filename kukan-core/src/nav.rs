//! Section navigation and menu visibility.
//!
//! Exactly one section is visible at a time. The three viewports are
//! expensive, so they are built once, on the first arrival at the
//! geometry section, and reused for every visit after that.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Welcome,
    Geometry,
    Physics,
}

impl Section {
    pub const ORDER: [Section; 3] = [Section::Welcome, Section::Geometry, Section::Physics];
}

#[derive(Debug, Default)]
pub struct NavController {
    section: Section,
    menu_open: bool,
    viewports_ready: bool,
}

impl NavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Switch sections, closing the menu. Returns true when this arrival
    /// must initialize the viewports (first time on the geometry section).
    #[must_use]
    pub fn navigate(&mut self, section: Section) -> bool {
        self.section = section;
        self.menu_open = false;
        if section == Section::Geometry && !self.viewports_ready {
            self.viewports_ready = true;
            return true;
        }
        false
    }

    pub fn viewports_ready(&self) -> bool {
        self.viewports_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_welcome_section() {
        let nav = NavController::new();
        assert_eq!(nav.section(), Section::Welcome);
        assert!(!nav.menu_open());
        assert!(!nav.viewports_ready());
    }

    #[test]
    fn first_geometry_arrival_requests_viewport_init_once() {
        let mut nav = NavController::new();
        assert!(nav.navigate(Section::Geometry));
        assert!(nav.viewports_ready());
        assert!(!nav.navigate(Section::Physics));
        assert!(!nav.navigate(Section::Geometry));
    }

    #[test]
    fn navigating_closes_the_menu() {
        let mut nav = NavController::new();
        nav.toggle_menu();
        assert!(nav.menu_open());
        let _ = nav.navigate(Section::Physics);
        assert!(!nav.menu_open());
    }
}
