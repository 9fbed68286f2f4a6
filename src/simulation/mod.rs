//! Cosmetic demo flows behind the page's "(Simulated)" buttons.
//!
//! A simulation is a fixed script of visible events separated by pauses.
//! Nothing is downloaded, loaded or trained. Every success message says so.

mod runner;

pub use runner::{
    SimulationId, SimulationPacing, SimulationRunner, SimulationSnapshot, SimulationState,
    MAX_TIME_SCALE,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which demo a button runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    ResumeDownload,
    DashboardLoad,
    ModelTraining,
}

impl SimulationKind {
    pub fn all() -> &'static [SimulationKind] {
        &[Self::ResumeDownload, Self::DashboardLoad, Self::ModelTraining]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResumeDownload => "resume_download",
            Self::DashboardLoad => "dashboard_load",
            Self::ModelTraining => "model_training",
        }
    }

    /// Accepts both `model_training` and `model-training`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.replace('-', "_").as_str() {
            "resume_download" => Some(Self::ResumeDownload),
            "dashboard_load" => Some(Self::DashboardLoad),
            "model_training" => Some(Self::ModelTraining),
            _ => None,
        }
    }

    /// Button caption.
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::ResumeDownload => "Download My Resume (Simulated)",
            Self::DashboardLoad => "Simulate Dashboard Load",
            Self::ModelTraining => "Simulate Model Training",
        }
    }
}

impl std::fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decorative flourish shown after success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Balloons,
    Snow,
}

/// Something the user sees while a simulation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// Opens an expandable status box with a heading.
    Status { label: String },
    /// A line inside the status box.
    Message { text: String },
    Spinner { text: String },
    Progress { percent: u8, text: String },
    /// Closes the status box with a final heading.
    StatusComplete { label: String },
    Success { message: String },
    Toast { message: String },
    Effect { effect: Effect },
}

/// One script instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Emit(SimulationEvent),
    Pause(Duration),
}

const TRAINING_TEXT: &str = "Operation in progress. Please wait.";

/// Build the full script for a simulation.
pub fn script(kind: SimulationKind) -> Vec<Step> {
    use SimulationEvent as E;
    use Step::{Emit, Pause};

    match kind {
        SimulationKind::ResumeDownload => vec![
            Emit(E::Status {
                label: "Downloading resume...".to_string(),
            }),
            Emit(E::Message {
                text: "Initiating download...".to_string(),
            }),
            Pause(Duration::from_millis(1000)),
            Emit(E::Message {
                text: "Verifying file integrity...".to_string(),
            }),
            Pause(Duration::from_millis(500)),
            Emit(E::Message {
                text: "Almost done...".to_string(),
            }),
            Pause(Duration::from_millis(1500)),
            Emit(E::StatusComplete {
                label: "Download Complete!".to_string(),
            }),
            Emit(E::Success {
                message: "Resume downloaded successfully! (This is a simulation)".to_string(),
            }),
            Emit(E::Toast {
                message: "Resume downloaded!".to_string(),
            }),
        ],
        SimulationKind::DashboardLoad => vec![
            Emit(E::Spinner {
                text: "Loading dashboard components...".to_string(),
            }),
            Pause(Duration::from_millis(2000)),
            Emit(E::Success {
                message: "Dashboard components loaded! (This is a simulation)".to_string(),
            }),
            Emit(E::Effect {
                effect: Effect::Balloons,
            }),
        ],
        SimulationKind::ModelTraining => {
            let mut steps = Vec::with_capacity(203);
            steps.push(Emit(E::Progress {
                percent: 0,
                text: TRAINING_TEXT.to_string(),
            }));
            for percent in 1..=100u8 {
                steps.push(Pause(Duration::from_millis(10)));
                steps.push(Emit(E::Progress {
                    percent,
                    text: format!("{} {}%", TRAINING_TEXT, percent),
                }));
            }
            steps.push(Emit(E::Success {
                message: "Model training complete! (This is a simulation)".to_string(),
            }));
            steps.push(Emit(E::Effect {
                effect: Effect::Snow,
            }));
            steps
        }
    }
}
