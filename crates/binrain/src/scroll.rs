//! Scroll-driven hero shrinking and active navigation tracking.

use crate::page::{HOME_ID, SectionSpan};

/// How far the hero-to-sidebar transformation has progressed (0.0-1.0).
///
/// The transformation starts `start_distance` rows before the first section
/// and completes over `animation_distance` rows of scrolling.
pub fn hero_progress(
    scroll: u16,
    section_top: u16,
    start_distance: u16,
    animation_distance: u16,
) -> f32 {
    let scroll = i32::from(scroll);
    let trigger = i32::from(section_top) - i32::from(start_distance);
    let distance = i32::from(animation_distance);

    if scroll < trigger {
        0.0
    } else if scroll >= trigger + distance {
        1.0
    } else {
        (scroll - trigger) as f32 / distance as f32
    }
}

/// Hero presentation at a given progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroStyle {
    /// Visual scale, 1.0 down to 0.8.
    pub scale: f32,
    /// Width as a percentage of the screen, 50 down to 42 before scaling.
    pub width_percent: f32,
    /// Rows from the top of the body when pinned.
    pub top_offset: u16,
    /// Whether the hero is pinned as a sidebar.
    pub pinned: bool,
    /// Whether the sections shift right to make room for the sidebar.
    pub indent_sections: bool,
}

impl HeroStyle {
    pub fn at(progress: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            scale: 1.0 - 0.2 * p,
            width_percent: 50.0 - 8.0 * p,
            top_offset: (1.0 + 3.0 * p).round() as u16,
            pinned: p > 0.1,
            indent_sections: p > 0.8,
        }
    }

    /// Sidebar width in columns for a screen `screen_width` wide.
    pub fn sidebar_width(&self, screen_width: u16) -> u16 {
        (f32::from(screen_width) * self.width_percent / 100.0 * self.scale).round() as u16
    }
}

/// Left padding for sections while the sidebar is pinned.
const SECTION_INDENT_PERCENT: u16 = 45;

/// Section indent in columns for a screen `screen_width` wide.
pub fn section_indent(screen_width: u16) -> u16 {
    let indent = u32::from(screen_width) * u32::from(SECTION_INDENT_PERCENT) / 100;
    u16::try_from(indent).unwrap_or(u16::MAX)
}

/// Result of checking which navigation link should be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavUpdate<'a> {
    Activate(&'a str),
    /// Nothing matched; leave the current link alone.
    Keep,
}

/// Pick the section under `scroll + offset`.
///
/// Sections are checked bottom-up so the lowest match wins. Near the top of
/// the page with no match, home is active.
pub fn active_section(scroll: u16, spans: &[SectionSpan], offset: u16) -> NavUpdate<'_> {
    let probe = scroll.saturating_add(offset);
    if let Some(span) = spans.iter().rev().find(|s| s.contains(probe)) {
        return NavUpdate::Activate(&span.id);
    }
    if scroll < offset {
        return NavUpdate::Activate(HOME_ID);
    }
    NavUpdate::Keep
}

/// The currently highlighted navigation link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    active: Option<String>,
}

impl NavState {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Apply an update. Returns true if the active link changed.
    pub fn apply(&mut self, update: NavUpdate<'_>) -> bool {
        match update {
            NavUpdate::Activate(id) if self.active.as_deref() != Some(id) => {
                tracing::debug!(section = id, "active section changed");
                self.active = Some(id.to_string());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans() -> Vec<SectionSpan> {
        vec![
            SectionSpan {
                id: HOME_ID.into(),
                top: 0,
                height: 30,
            },
            SectionSpan {
                id: "about".into(),
                top: 30,
                height: 10,
            },
            SectionSpan {
                id: "contact".into(),
                top: 40,
                height: 5,
            },
        ]
    }

    #[test]
    fn test_hero_progress_boundaries() {
        // Trigger at 30 - 20 = 10, complete at 25.
        assert_eq!(hero_progress(0, 30, 20, 15), 0.0);
        assert_eq!(hero_progress(9, 30, 20, 15), 0.0);
        assert_eq!(hero_progress(10, 30, 20, 15), 0.0);
        assert_eq!(hero_progress(13, 30, 20, 15), 0.2);
        assert_eq!(hero_progress(25, 30, 20, 15), 1.0);
        assert_eq!(hero_progress(200, 30, 20, 15), 1.0);
    }

    #[test]
    fn test_hero_progress_trigger_above_page_top() {
        // Section closer than the start distance: already partway at scroll 0.
        let progress = hero_progress(0, 10, 20, 15);
        assert!((progress - 10.0 / 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hero_progress_zero_distance() {
        assert_eq!(hero_progress(9, 30, 20, 0), 0.0);
        assert_eq!(hero_progress(10, 30, 20, 0), 1.0);
    }

    #[test]
    fn test_hero_style() {
        let rest = HeroStyle::at(0.0);
        assert_eq!(rest.scale, 1.0);
        assert_eq!(rest.width_percent, 50.0);
        assert!(!rest.pinned);
        assert!(!rest.indent_sections);

        assert!(!HeroStyle::at(0.1).pinned);
        assert!(HeroStyle::at(0.11).pinned);
        assert!(!HeroStyle::at(0.8).indent_sections);

        let done = HeroStyle::at(1.0);
        assert_eq!(done.width_percent, 42.0);
        assert!((done.scale - 0.8).abs() < f32::EPSILON);
        assert!(done.pinned);
        assert!(done.indent_sections);
        assert_eq!(done.top_offset, 4);
        assert_eq!(done.sidebar_width(100), 34);
    }

    #[test]
    fn test_section_indent() {
        assert_eq!(section_indent(0), 0);
        assert_eq!(section_indent(100), 45);
        assert_eq!(section_indent(1500), 675);
        assert_eq!(section_indent(u16::MAX), 29490);
    }

    #[test]
    fn test_active_section_bottom_up() {
        let spans = spans();
        assert_eq!(active_section(0, &spans, 5), NavUpdate::Activate(HOME_ID));
        assert_eq!(active_section(25, &spans, 5), NavUpdate::Activate("about"));
        assert_eq!(active_section(36, &spans, 5), NavUpdate::Activate("contact"));
    }

    #[test]
    fn test_active_section_past_end_keeps_current() {
        let spans = spans();
        assert_eq!(active_section(60, &spans, 5), NavUpdate::Keep);
    }

    #[test]
    fn test_active_section_home_fallback() {
        let spans = vec![SectionSpan {
            id: "about".into(),
            top: 10,
            height: 5,
        }];
        assert_eq!(active_section(2, &spans, 5), NavUpdate::Activate(HOME_ID));
        assert_eq!(active_section(6, &spans, 5), NavUpdate::Activate("about"));
        assert_eq!(active_section(20, &spans, 5), NavUpdate::Keep);
    }

    #[test]
    fn test_nav_state_apply() {
        let mut nav = NavState::default();
        assert!(nav.apply(NavUpdate::Activate("about")));
        assert!(!nav.apply(NavUpdate::Activate("about")));
        assert!(!nav.apply(NavUpdate::Keep));
        assert_eq!(nav.active(), Some("about"));
    }
}
