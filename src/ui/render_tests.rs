#![allow(clippy::unwrap_used)]

use ratatui::layout::Rect;

use super::app::Screen;
use super::render::*;

// ── Tabs and hints ────────────────────────────────────────────

#[test]
fn test_details_lights_statistics_tab() {
    assert_eq!(active_tab(Screen::Details), Screen::Statistics);
    assert_eq!(active_tab(Screen::History), Screen::History);
}

#[test]
fn test_every_screen_has_hints() {
    for screen in [Screen::Home, Screen::History, Screen::Statistics, Screen::Details] {
        assert!(!screen_hints(screen).is_empty());
    }
    assert!(screen_hints(Screen::Statistics).contains("exclude"));
}

// ── Help overlay ──────────────────────────────────────────────

#[test]
fn test_command_help_uses_longest_alias() {
    let help = command_help();
    assert!(help.contains(&("statistics", "Go to Statistics")));
    assert!(help.contains(&("quit", "Quit SpendTUI")));
    assert!(!help.iter().any(|(name, _)| *name == "stats" || *name == "q"));
}

#[test]
fn test_command_help_is_sorted_and_unique() {
    let help = command_help();
    let names: Vec<&str> = help.iter().map(|(name, _)| *name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert!(names.iter().all(|name| name.len() > 1));
}

#[test]
fn test_help_lines_have_a_heading_per_section() {
    let lines = help_lines();
    let headings: Vec<&str> = lines
        .iter()
        .filter(|(_, heading)| *heading)
        .map(|(text, _)| text.trim())
        .collect();
    assert_eq!(headings, vec!["Navigation", "Statistics", "Commands"]);
    assert!(lines.iter().any(|(text, _)| text.contains(":refresh")));
    assert!(lines.iter().any(|(text, _)| text.contains("Exclude from total")));
}

// ── centered ──────────────────────────────────────────────────

#[test]
fn test_centered_in_large_area() {
    let area = Rect::new(0, 0, 100, 40);
    assert_eq!(centered(area, 64, 20), Rect::new(18, 10, 64, 20));
}

#[test]
fn test_centered_shrinks_to_fit() {
    let area = Rect::new(2, 1, 30, 10);
    let popup = centered(area, 64, 20);
    assert_eq!(popup.width, 26);
    assert_eq!(popup.height, 8);
    assert_eq!((popup.x, popup.y), (4, 2));
}

#[test]
fn test_centered_tiny_area_does_not_underflow() {
    let popup = centered(Rect::new(0, 0, 3, 1), 64, 20);
    assert_eq!((popup.width, popup.height), (0, 0));
}
