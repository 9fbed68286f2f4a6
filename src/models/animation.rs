//! Lottie animation slots and payloads.

use serde::{Deserialize, Serialize};

/// A parsed Lottie document.
///
/// The structure is opaque to the server: it is fetched per page request,
/// handed to the player widget and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationPayload(serde_json::Value);

impl AnimationPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Compact JSON for the player's `data-animation` attribute.
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }
}

/// The four places on the page that show an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationSlot {
    /// Greeting next to the header.
    Hello,
    /// Right column of the About section (plays the skills asset).
    About,
    /// Left of the projects intro.
    Projects,
    /// Beside the contact form.
    Contact,
}

impl AnimationSlot {
    pub fn all() -> &'static [AnimationSlot] {
        &[Self::Hello, Self::About, Self::Projects, Self::Contact]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    /// Widget key, unique per slot.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hello => "hello_animation",
            Self::About => "about_animation",
            Self::Projects => "projects_animation",
            Self::Contact => "contact_animation",
        }
    }

    /// Player height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Self::Hello => 250,
            Self::About => 300,
            Self::Projects => 200,
            Self::Contact => 300,
        }
    }

    /// Source used when the config does not override it.
    pub fn default_url(&self) -> &'static str {
        match self {
            Self::Hello => "https://lottiefiles.com/animations/robot-developer-1WbL1gNqL2",
            Self::About => "https://lottiefiles.com/animations/skills-development-rO0iJd7wz4",
            Self::Projects => "https://lottiefiles.com/animations/coding-work-1j3C9G5fW6",
            Self::Contact => "https://lottiefiles.com/animations/email-send-Q3bJ7Qk2eB",
        }
    }

    /// Notice shown in place of the player when the asset is absent.
    pub fn fallback_notice(&self) -> &'static str {
        match self {
            Self::Hello => "Lottie 'hello' animation failed to load. Check the URL.",
            Self::About => "Lottie animation failed to load. Check the URL.",
            Self::Projects => "Lottie projects animation failed to load.",
            Self::Contact => "Lottie contact animation failed to load. Check the URL.",
        }
    }
}

impl std::fmt::Display for AnimationSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
