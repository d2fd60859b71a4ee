//! Navigation and modal state.
//!
//! The DOM host forwards clicks and key presses here and applies the
//! returned decisions (class toggles, aria attributes, scroll targets).

/// Modal opened by project cards that carry only `data-project`.
pub const PROJECT_MODAL_ID: &str = "arch-modal";

/// Section scrolled to by the hero's about button and scroll chevron.
pub const ABOUT_SECTION_ID: &str = "about";

/// Section scrolled to by the hero's projects button.
pub const PROJECTS_SECTION_ID: &str = "projects";

/// Collapsible navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Whether the menu is expanded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle button clicked. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Any click on the document. Closes the menu unless the click landed
    /// inside the toggle or the menu. Returns the new state.
    pub fn document_click(&mut self, inside_toggle: bool, inside_menu: bool) -> bool {
        if !inside_toggle && !inside_menu {
            self.open = false;
        }
        self.open
    }
}

/// Element id targeted by an in-page `#anchor` href.
///
/// External links and a bare `#` yield `None`.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Modal a trigger opens: its `data-modal`, else the project modal when it
/// carries `data-project`, else nothing.
#[must_use]
pub fn modal_for_trigger<'a>(data_modal: Option<&'a str>, data_project: Option<&str>) -> Option<&'a str> {
    match data_modal.filter(|id| !id.is_empty()) {
        Some(id) => Some(id),
        None => data_project.map(|_| PROJECT_MODAL_ID),
    }
}

/// Keys that activate a focusable non-button element.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// `aria-hidden` value for a modal.
#[must_use]
pub fn aria_hidden(open: bool) -> &'static str {
    if open {
        "false"
    } else {
        "true"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_menu() {
        let mut nav = NavMenu::default();
        assert!(nav.toggle());
        assert!(nav.document_click(false, true));
        assert!(nav.document_click(true, false));
        assert!(!nav.document_click(false, false));
        assert!(!nav.is_open());
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://example.com/#x"), None);
    }

    #[test]
    fn test_modal_for_trigger() {
        assert_eq!(modal_for_trigger(Some("cv-modal"), None), Some("cv-modal"));
        assert_eq!(modal_for_trigger(None, Some("shop")), Some(PROJECT_MODAL_ID));
        assert_eq!(modal_for_trigger(Some(""), Some("shop")), Some(PROJECT_MODAL_ID));
        assert_eq!(modal_for_trigger(None, None), None);
    }

    #[test]
    fn test_activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Escape"));
    }
}
