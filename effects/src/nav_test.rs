use super::*;
use crate::testing::{Harness, sample_page};

fn started() -> (Harness, crate::testing::SamplePage, Navigation, Navbar) {
    let (host, page) = sample_page();
    let mut harness = Harness::new(host);
    let navbar = Navbar::attach(&mut harness.host);
    let nav = Navigation::start(&mut harness.ctx());
    (harness, page, nav, navbar)
}

// =============================================================
// Link mapping
// =============================================================

#[test]
fn section_for_known_links() {
    assert_eq!(section_for_link("HOME"), Some(HERO));
    assert_eq!(section_for_link("MENUS"), Some(MENU_SECTION));
    assert_eq!(section_for_link("ABOUT US"), Some(ABOUT_TARGET));
    assert_eq!(section_for_link("CONTACT"), Some(CONTACT_SECTION));
}

#[test]
fn home_link_selector_matches_bare_hash_only() {
    let (mut host, page) = sample_page();
    assert_eq!(HOME_LINK, ".nav-menu a[href=\"#\"]");
    assert_eq!(host.query_all(HOME_LINK), vec![page.home]);
}

#[test]
fn section_for_link_trims_whitespace() {
    assert_eq!(section_for_link("  MENUS\n"), Some(MENU_SECTION));
}

#[test]
fn section_for_link_is_case_sensitive() {
    assert_eq!(section_for_link("Home"), None);
    assert_eq!(section_for_link("about us"), None);
}

#[test]
fn section_for_unknown_link_is_none() {
    assert_eq!(section_for_link("BLOG"), None);
    assert_eq!(section_for_link(""), None);
}

// =============================================================
// Start
// =============================================================

#[test]
fn start_excludes_contact_links() {
    let (_, page, nav, _) = started();
    assert_eq!(nav.links(), &[page.home, page.menus, page.about, page.contact_link]);
}

#[test]
fn start_observes_sections_and_hero() {
    let (harness, page, nav, _) = started();
    assert!(nav.sections().contains(&page.hero));
    assert!(nav.sections().contains(&page.menu_section));
    let observed: Vec<_> = harness.host.observed.iter().filter(|(o, _, _)| *o == Observer::Sections).collect();
    assert_eq!(observed.len(), nav.sections().len());
    assert!(observed.iter().all(|(_, _, opts)| *opts == section_observer_options()));
}

#[test]
fn start_listens_for_scroll_and_clicks() {
    let (harness, page, _, _) = started();
    assert!(harness.host.is_listening(Target::Window, EventKind::Scroll));
    assert!(harness.host.is_listening(Target::Node(page.home), EventKind::Click));
    assert!(!harness.host.is_listening(Target::Node(page.phone_link), EventKind::Click));
}

// =============================================================
// Clicks
// =============================================================

#[test]
fn each_recognized_link_scrolls_once_with_offset() {
    let cases = [(0, 0.0 - 80.0), (1, 1800.0 - 80.0), (2, 950.0 - 80.0), (3, 2600.0 - 80.0)];
    for (index, expected) in cases {
        let (mut harness, _, mut nav, _) = started();
        let link = nav.links()[index];
        let outcome = nav.on_click(&mut harness.ctx(), link);
        assert!(outcome.prevent_default, "link {index} should prevent default");
        assert_eq!(harness.host.scrolls, vec![expected], "link {index}");
    }
}

#[test]
fn unrecognized_link_is_noop() {
    let (mut harness, page, mut nav, _) = started();
    harness.host.set_text(page.about, "GALLERY");
    let outcome = nav.on_click(&mut harness.ctx(), page.about);
    assert!(!outcome.prevent_default);
    assert!(harness.host.scrolls.is_empty());
}

#[test]
fn missing_target_section_is_noop() {
    let (mut harness, page, mut nav, _) = started();
    harness.host.remove(page.contact);
    let outcome = nav.on_click(&mut harness.ctx(), page.contact_link);
    assert!(!outcome.prevent_default);
    assert!(harness.host.scrolls.is_empty());
}

#[test]
fn click_on_unregistered_node_is_ignored() {
    let (mut harness, page, mut nav, _) = started();
    let outcome = nav.on_click(&mut harness.ctx(), page.book);
    assert_eq!(outcome, Outcome::default());
}

// =============================================================
// Scroll state
// =============================================================

fn scroll_to(harness: &mut Harness, nav: &mut Navigation, navbar: &mut Navbar, y: f64) {
    harness.host.scroll_y = y;
    nav.on_scroll(&mut harness.ctx(), navbar);
}

#[test]
fn scrolled_tracks_final_offset_only() {
    let sequences: [&[f64]; 4] = [&[0.0, 150.0], &[500.0, 20.0, 150.0], &[150.0, 150.0, 150.0], &[300.0, 101.0]];
    for seq in sequences {
        let (mut harness, page, mut nav, mut navbar) = started();
        for y in seq {
            scroll_to(&mut harness, &mut nav, &mut navbar, *y);
        }
        assert!(harness.host.has_class(page.navbar, "scrolled"), "{seq:?}");
    }
}

#[test]
fn scrolled_cleared_at_threshold() {
    let (mut harness, page, mut nav, mut navbar) = started();
    scroll_to(&mut harness, &mut nav, &mut navbar, 400.0);
    scroll_to(&mut harness, &mut nav, &mut navbar, 100.0);
    assert!(!harness.host.has_class(page.navbar, "scrolled"));
}

#[test]
fn scrolling_down_past_hide_threshold_hides() {
    let (mut harness, page, mut nav, mut navbar) = started();
    scroll_to(&mut harness, &mut nav, &mut navbar, 150.0);
    assert!(!harness.host.has_class(page.navbar, "nav-hidden"));
    scroll_to(&mut harness, &mut nav, &mut navbar, 250.0);
    assert!(harness.host.has_class(page.navbar, "nav-hidden"));
    assert!(navbar.is_hidden());
}

#[test]
fn scrolling_up_shows_again() {
    let (mut harness, page, mut nav, mut navbar) = started();
    scroll_to(&mut harness, &mut nav, &mut navbar, 600.0);
    scroll_to(&mut harness, &mut nav, &mut navbar, 500.0);
    assert!(!harness.host.has_class(page.navbar, "nav-hidden"));
}

#[test]
fn repeated_same_offset_shows_navbar() {
    let (mut harness, page, mut nav, mut navbar) = started();
    scroll_to(&mut harness, &mut nav, &mut navbar, 600.0);
    scroll_to(&mut harness, &mut nav, &mut navbar, 600.0);
    assert!(!harness.host.has_class(page.navbar, "nav-hidden"));
}

// =============================================================
// Active link
// =============================================================

fn active_links(harness: &mut Harness) -> Vec<NodeId> {
    let links = harness.host.query_all(ALL_NAV_LINKS);
    links.into_iter().filter(|l| harness.host.has_class(*l, CLASS_ACTIVE)).collect()
}

#[test]
fn hero_marks_home_link() {
    let (mut harness, page, mut nav, _) = started();
    nav.on_intersection(&mut harness.ctx(), page.hero, true);
    assert_eq!(active_links(&mut harness), vec![page.home]);
}

#[test]
fn menu_section_marks_menus_link() {
    let (mut harness, page, mut nav, _) = started();
    nav.on_intersection(&mut harness.ctx(), page.hero, true);
    nav.on_intersection(&mut harness.ctx(), page.menu_section, true);
    assert_eq!(active_links(&mut harness), vec![page.menus]);
}

#[test]
fn unmapped_section_clears_all() {
    let (mut harness, page, mut nav, _) = started();
    nav.on_intersection(&mut harness.ctx(), page.hero, true);
    nav.on_intersection(&mut harness.ctx(), page.contact, true);
    assert!(active_links(&mut harness).is_empty());
}

#[test]
fn non_intersecting_entry_keeps_state() {
    let (mut harness, page, mut nav, _) = started();
    nav.on_intersection(&mut harness.ctx(), page.hero, true);
    nav.on_intersection(&mut harness.ctx(), page.menu_section, false);
    assert_eq!(active_links(&mut harness), vec![page.home]);
}

#[test]
fn active_link_is_exclusive_under_any_sequence() {
    let (mut harness, page, mut nav, _) = started();
    let sections = [page.hero, page.menu_section, page.service, page.hero, page.menu_section, page.contact];
    for (i, section) in sections.iter().cycle().take(30).enumerate() {
        nav.on_intersection(&mut harness.ctx(), *section, i % 4 != 3);
        assert!(active_links(&mut harness).len() <= 1);
    }
}
