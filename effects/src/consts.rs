//! Selectors, class names and labels shared with the page markup.

// ── Navigation ──────────────────────────────────────────────────

pub const NAVBAR: &str = ".nav-bar";
pub const NAV_MENU: &str = ".nav-menu";
/// Links that navigate within the page (contact links excluded).
pub const NAV_LINKS: &str = r#".nav-menu a:not([href*="mailto"]):not([href*="tel"])"#;
pub const ALL_NAV_LINKS: &str = ".nav-menu a";
pub const HOME_LINK: &str = r##".nav-menu a[href="#"]"##;
pub const TRACKED_SECTIONS: &str = "section[id], .hero-section";

pub const HERO: &str = ".hero-section";
pub const MENU_SECTION: &str = ".menu-section";
pub const ABOUT_TARGET: &str = ".service h2";
pub const CONTACT_SECTION: &str = ".contact";
pub const SERVICE_SECTION: &str = ".service";
pub const SCROLL_INDICATOR: &str = ".scroll-indicator";

pub const CLASS_HERO: &str = "hero-section";
pub const CLASS_MENU_SECTION: &str = "menu-section";
pub const CLASS_SCROLLED: &str = "scrolled";
pub const CLASS_NAV_HIDDEN: &str = "nav-hidden";
pub const CLASS_ACTIVE: &str = "active";

// ── Reveal ──────────────────────────────────────────────────────

pub const REVEAL_TARGETS: &str = ".service-card, .service-card2, .sample-menu, .option-menu, .contact-item, h2, h3";
pub const REVEAL_GRIDS: &str = ".service-grid, .sample-grid";
pub const CLASS_REVEAL: &str = "reveal-element";
pub const CLASS_REVEALED: &str = "revealed";

// ── Intro ───────────────────────────────────────────────────────

pub const HERO_TITLE: &str = ".hero-content h1";
pub const HERO_TEXT: &str = ".hero-content p";
pub const FLOATING: &str = ".food-survey, .service-img2";
pub const CLASS_FADE_IN_UP: &str = "fade-in-up";

// ── Interactive elements ────────────────────────────────────────

pub const IMAGES: &str = "img:not(.social-medias img)";
pub const BUTTONS: &str = "button, .book";
pub const MENU_OPTIONS: &str = ".option-menu";
pub const SAMPLE_MENUS: &str = ".sample-menu";
pub const CARDS: &str = ".service-card, .service-card2";
pub const SOCIAL_ICONS: &str = ".social-medias img";
pub const CLASS_LOADED: &str = "loaded";
pub const CLASS_MENU_HOVER: &str = "menu-hover";
pub const CLASS_HIGHLIGHT: &str = "highlight";

// ── Rotator ─────────────────────────────────────────────────────

pub const CLASS_HIGHLIGHT_TEXT: &str = "highlight-text";
pub const CLASS_BREAKFAST: &str = "breakfast-time";
pub const CLASS_LUNCH: &str = "lunch-time";
pub const CLASS_DINNER: &str = "dinner-time";

// ── Contact ─────────────────────────────────────────────────────

pub const BOOKING_BUTTONS: &str = r#"button[type="button"], .book"#;
pub const CONTACT_LINKS: &str = r#"a[href^="tel"], a[href^="mailto"]"#;
pub const BOOKING_LABEL: &str = "BOOKING...";
pub const BOOKING_TOAST: &str = "Redirecting to consultation booking...";

// ── Newsletter ──────────────────────────────────────────────────

pub const CLASS_NEWSLETTER: &str = "newsletter-popup";
pub const CLASS_SHOW: &str = "show";

// ── Mobile ──────────────────────────────────────────────────────

pub const CLASS_MOBILE_TOGGLE: &str = "mobile-menu-toggle";
pub const CLASS_MOBILE_OPEN: &str = "mobile-open";
pub const GLYPH_MENU_CLOSED: &str = "☰";
pub const GLYPH_MENU_OPEN: &str = "✕";
pub const INLINE_ANIMATED: &str = r#"[style*="animation"]"#;

// ── Toast ───────────────────────────────────────────────────────

pub const CLASS_NOTIFICATION: &str = "notification";
