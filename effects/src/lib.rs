//! Page effects engine for the Djinn restaurant page.
//!
//! Every behavior of the page (smooth navigation, reveal-on-scroll, hover and
//! tilt effects, the typewriter intro, toasts, the booking deep link, the
//! newsletter popup and the mobile menu) lives here as plain Rust. The crate
//! never touches the browser directly: it talks to the page through the
//! [`host::Host`] trait and schedules delayed work on a virtual-time
//! [`timer::TimerQueue`]. The WebAssembly crate at the repository root
//! implements `Host` over `web-sys` and drives the timers with real timeouts.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | Top-level [`page::PageEffects`]: start gate, event routing, timers |
//! | [`host`] | Host port: element handles, queries, mutations, subscriptions |
//! | [`event`] | Events delivered by the host and dispatch outcomes |
//! | [`timer`] | Virtual-time timer queue with cancellable handles |
//! | [`config`] | Tunables with defaults and JSON loading |
//! | [`consts`] | Selectors, class names and storage keys |
//! | [`navbar`] | Single owner of the navbar `scrolled` / `nav-hidden` state |
//! | [`nav`] | Link navigation and active-section highlighting |
//! | [`scroll_fx`] | Hero parallax and scroll indicator |
//! | [`reveal`] | One-way reveal animations with stagger |
//! | [`intro`] | Typewriter intro and floating elements |
//! | [`interact`] | Tilt, ripple and hover effects |
//! | [`rotator`] | Featured-dish rotation and time-of-day menu class |
//! | [`contact`] | Booking deep link and contact link tracking |
//! | [`newsletter`] | Newsletter popup |
//! | [`mobile`] | Mobile menu toggle, swipe gestures, animation normalization |
//! | [`toast`] | Notification toasts |
//! | [`styles`] | Injected presentation rules |

pub mod config;
pub mod consts;
pub mod contact;
pub mod event;
pub mod host;
pub mod interact;
pub mod intro;
pub mod mobile;
pub mod nav;
pub mod navbar;
pub mod newsletter;
pub mod page;
pub mod reveal;
pub mod rotator;
pub mod scroll_fx;
pub mod styles;
pub mod timer;
pub mod toast;

#[cfg(test)]
mod testing;
