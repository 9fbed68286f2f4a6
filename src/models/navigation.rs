//! Section anchors and the sidebar navigation list.

use serde::Serialize;

/// Identifier of a page section that navigation can scroll to.
///
/// Sections render their `id` attribute from this enum and navigation
/// links target it, so a link can never point at a section that is not
/// emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionAnchor {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl SectionAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    /// All anchors in page order.
    pub fn all() -> &'static [SectionAnchor] {
        &[
            Self::Home,
            Self::About,
            Self::Skills,
            Self::Projects,
            Self::Contact,
        ]
    }
}

impl std::fmt::Display for SectionAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sidebar entry: display label plus the section it scrolls to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub anchor: SectionAnchor,
}

impl NavEntry {
    /// Fragment link for this entry, e.g. `#about`.
    pub fn href(&self) -> String {
        format!("#{}", self.anchor.as_str())
    }
}

/// Sidebar navigation, in display order.
pub const NAVIGATION: &[NavEntry] = &[
    NavEntry {
        label: "Home",
        anchor: SectionAnchor::Home,
    },
    NavEntry {
        label: "About Me",
        anchor: SectionAnchor::About,
    },
    NavEntry {
        label: "Skills",
        anchor: SectionAnchor::Skills,
    },
    NavEntry {
        label: "Projects",
        anchor: SectionAnchor::Projects,
    },
    NavEntry {
        label: "Contact",
        anchor: SectionAnchor::Contact,
    },
];
