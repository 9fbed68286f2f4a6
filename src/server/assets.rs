//! Static asset constants (CSS and JavaScript).

/// Default stylesheet, used when no stylesheet file is configured.
pub const CSS: &str = include_str!("styles.css");

/// Player setup, sidebar scrolling and simulation polling.
pub const JS: &str = include_str!("scripts.js");
