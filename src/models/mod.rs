//! Data models for the portfolio page.

mod animation;
mod content;
mod navigation;

pub use animation::{AnimationPayload, AnimationSlot};
pub use content::{
    ContactForm, Link, Profile, Project, ProjectLink, SkillGroup, PROJECTS, SKILL_GROUPS,
};
pub use navigation::{NavEntry, SectionAnchor, NAVIGATION};
