//! Navigation and reveal behavior as pure functions.
//!
//! The original page wired these behaviors to scroll and intersection
//! callbacks. Here they are functions of the current scroll offset and of
//! per-element visibility ratios, so the behavior is testable without a
//! rendering surface. A front end feeds in viewport state and applies the
//! returned decisions.

use std::collections::HashSet;

/// Fraction of an element that must be visible before it reveals.
pub const REVEAL_THRESHOLD: f64 = 0.15;

/// Fixed offset subtracted from section tops, matching the sticky nav
/// height, when deciding which section is current.
pub const NAV_OFFSET: f64 = 80.0;

/// A section's id and its top position in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPosition {
    pub id: String,
    pub top: f64,
}

/// The section whose nav link should carry the "active" class.
///
/// A section is current once `top - offset <= scroll_y`; with sections in
/// document order the last one past the threshold wins. Before the first
/// section is reached, nothing is active.
pub fn active_section(scroll_y: f64, sections: &[SectionPosition], offset: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| section.top - offset <= scroll_y)
        .next_back()
        .map(|section| section.id.as_str())
}

/// Resolve an anchor href to the in-page section id it targets.
///
/// Only `#id` hrefs are smooth-scroll targets; everything else (external
/// links, the bare `#`) is left to default navigation.
pub fn scroll_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// One-shot entrance-reveal tracking.
///
/// Each element reveals the first time it crosses [`REVEAL_THRESHOLD`]
/// visibility and is then dropped from observation; later ratio changes are
/// ignored.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashSet<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        RevealTracker::default()
    }

    /// Report an element's current visibility ratio. Returns true exactly
    /// once per element, on the first report at or above the threshold.
    pub fn observe(&mut self, id: &str, visible_ratio: f64) -> bool {
        if self.revealed.contains(id) {
            return false;
        }
        if visible_ratio >= REVEAL_THRESHOLD {
            self.revealed.insert(id.to_string());
            return true;
        }
        false
    }

    /// Whether an element has already revealed.
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionPosition> {
        vec![
            SectionPosition { id: "attendance".to_string(), top: 100.0 },
            SectionPosition { id: "potluck".to_string(), top: 600.0 },
            SectionPosition { id: "shopping".to_string(), top: 1200.0 },
        ]
    }

    #[test]
    fn nothing_active_above_first_section() {
        assert_eq!(active_section(0.0, &sections(), NAV_OFFSET), None);
    }

    #[test]
    fn last_section_past_threshold_is_active() {
        let sections = sections();
        assert_eq!(active_section(50.0, &sections, NAV_OFFSET), Some("attendance"));
        assert_eq!(active_section(550.0, &sections, NAV_OFFSET), Some("potluck"));
        assert_eq!(active_section(5000.0, &sections, NAV_OFFSET), Some("shopping"));
    }

    #[test]
    fn threshold_is_inclusive() {
        // top - offset == scroll_y counts as reached
        assert_eq!(active_section(20.0, &sections(), 80.0), Some("attendance"));
        assert_eq!(active_section(19.9, &sections(), 80.0), None);
    }

    #[test]
    fn scroll_targets_are_anchor_only() {
        assert_eq!(scroll_target("#potluck"), Some("potluck"));
        assert_eq!(scroll_target("#"), None);
        assert_eq!(scroll_target("https://example.com/#x"), None);
        assert_eq!(scroll_target("/edit"), None);
    }

    #[test]
    fn reveal_fires_once_at_threshold() {
        let mut tracker = RevealTracker::new();
        assert!(!tracker.observe("card", 0.1));
        assert!(tracker.observe("card", 0.15));
        assert!(tracker.is_revealed("card"));
        // Later reports never fire again, even below the threshold.
        assert!(!tracker.observe("card", 0.9));
        assert!(!tracker.observe("card", 0.0));
    }

    #[test]
    fn reveal_tracks_elements_independently() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.observe("a", 1.0));
        assert!(!tracker.is_revealed("b"));
        assert!(tracker.observe("b", 0.5));
    }
}
