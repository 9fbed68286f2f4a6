//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! Askama provides compile-time verification that templates are valid.

use std::collections::HashMap;

use askama::Template;

use super::SiteContent;
use crate::models::{
    AnimationPayload, AnimationSlot, ContactForm, Link, SectionAnchor, SkillGroup, NAVIGATION,
    PROJECTS, SKILL_GROUPS,
};
use crate::simulation::SimulationKind;

/// One animation slot: either a player or its fallback notice.
pub struct AnimationView {
    pub key: &'static str,
    pub height: u32,
    pub has_animation: bool,
    /// Lottie JSON for the player; empty when absent.
    pub animation_json: String,
    pub fallback_notice: &'static str,
}

impl AnimationView {
    pub fn new(slot: AnimationSlot, payload: Option<&AnimationPayload>) -> Self {
        Self {
            key: slot.key(),
            height: slot.height(),
            has_animation: payload.is_some(),
            animation_json: payload.map(AnimationPayload::to_json).unwrap_or_default(),
            fallback_notice: slot.fallback_notice(),
        }
    }
}

/// Sidebar link.
pub struct NavLink {
    pub label: &'static str,
    pub anchor: SectionAnchor,
}

/// A "(Simulated)" demo button.
pub struct SimulationButton {
    pub kind: &'static str,
    pub label: &'static str,
}

impl From<SimulationKind> for SimulationButton {
    fn from(kind: SimulationKind) -> Self {
        Self {
            kind: kind.as_str(),
            label: kind.button_label(),
        }
    }
}

/// Helper struct for project cards.
pub struct ProjectCard {
    pub title: &'static str,
    pub description: &'static str,
    pub links: Vec<Link>,
    pub simulation: Option<SimulationButton>,
}

/// The single portfolio page.
#[derive(Template)]
#[template(path = "portfolio.html")]
pub struct PortfolioTemplate<'a> {
    pub title: &'a str,
    pub home: SectionAnchor,
    pub about: SectionAnchor,
    pub skills: SectionAnchor,
    pub projects_anchor: SectionAnchor,
    pub contact_anchor: SectionAnchor,
    pub greeting: String,
    pub headline: String,
    pub passion_line: String,
    pub social_links: &'a [Link],
    pub about_paragraphs: Vec<String>,
    pub resume_button: SimulationButton,
    pub skill_groups: &'static [SkillGroup],
    pub projects: Vec<ProjectCard>,
    pub contact: &'a ContactForm,
    pub navigation: Vec<NavLink>,
    pub hello_animation: AnimationView,
    pub about_animation: AnimationView,
    pub projects_animation: AnimationView,
    pub contact_animation: AnimationView,
}

impl<'a> PortfolioTemplate<'a> {
    /// Assemble the page from site content and whatever animations loaded.
    pub fn build(
        site: &'a SiteContent,
        animations: &HashMap<AnimationSlot, AnimationPayload>,
    ) -> Self {
        let view = |slot: AnimationSlot| AnimationView::new(slot, animations.get(&slot));

        let projects = PROJECTS
            .iter()
            .map(|project| ProjectCard {
                title: project.title,
                description: project.description,
                links: project
                    .links
                    .iter()
                    .map(|l| Link::new(l.label, l.url))
                    .collect(),
                simulation: project.simulation.map(SimulationButton::from),
            })
            .collect();

        let navigation = NAVIGATION
            .iter()
            .map(|entry| NavLink {
                label: entry.label,
                anchor: entry.anchor,
            })
            .collect();

        Self {
            title: &site.title,
            home: SectionAnchor::Home,
            about: SectionAnchor::About,
            skills: SectionAnchor::Skills,
            projects_anchor: SectionAnchor::Projects,
            contact_anchor: SectionAnchor::Contact,
            greeting: site.profile.greeting(),
            headline: site.profile.headline(),
            passion_line: site.profile.passion_line(),
            social_links: &site.profile.links,
            about_paragraphs: site.profile.about_paragraphs(),
            resume_button: SimulationKind::ResumeDownload.into(),
            skill_groups: SKILL_GROUPS,
            projects,
            contact: &site.contact,
            navigation,
            hello_animation: view(AnimationSlot::Hello),
            about_animation: view(AnimationSlot::About),
            projects_animation: view(AnimationSlot::Projects),
            contact_animation: view(AnimationSlot::Contact),
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
}
