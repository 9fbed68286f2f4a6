//! Page content: profile, skills, projects and the contact form.
//!
//! Skills and projects are compiled in. The profile and contact form can be
//! overridden from the config file; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::simulation::SimulationKind;

/// A labeled outbound link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Identity shown in the header and About section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub location: String,
    pub passion: String,
    /// About text; blank lines separate paragraphs.
    pub about: String,
    pub links: Vec<Link>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "[Your Name]".to_string(),
            role: "[Your Profession/Role]".to_string(),
            location: "India".to_string(),
            passion: "[Your Passion/Domain, e.g., building data-driven applications, \
                      creating engaging web experiences, solving complex problems with code]"
                .to_string(),
            about: "I am a highly motivated and results-oriented [Your Profession/Role] with X \
                    years of experience in [Your Area of Expertise, e.g., Python development, \
                    machine learning, web development]. My journey into technology began when \
                    [brief story, e.g., I built my first small app, I got fascinated by data].\n\n\
                    I thrive on turning complex challenges into elegant, efficient, and \
                    user-friendly solutions. I am always eager to learn new technologies and \
                    improve my skills, believing in continuous growth and collaboration."
                .to_string(),
            links: vec![
                Link::new("Learn More", "https://yourwebsite.com/about"),
                Link::new("LinkedIn", "https://linkedin.com/in/yourprofile"),
                Link::new("GitHub", "https://github.com/yourgithub"),
            ],
        }
    }
}

impl Profile {
    pub fn greeting(&self) -> String {
        format!("Hi, I am {} 👋", self.name)
    }

    pub fn headline(&self) -> String {
        format!("A {} from {}", self.role, self.location)
    }

    pub fn passion_line(&self) -> String {
        format!("I am passionate about {}.", self.passion)
    }

    pub fn about_paragraphs(&self) -> Vec<String> {
        self.about
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Contact form posted straight to a hosted relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    /// Relay endpoint the browser submits to.
    pub action: String,
    pub submit_label: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            action: "https://formsubmit.co/your.email@example.com".to_string(),
            submit_label: "Send Message".to_string(),
        }
    }
}

/// A titled column of skills.
#[derive(Debug, Clone, Copy)]
pub struct SkillGroup {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const SKILL_GROUPS: &[SkillGroup] = &[
    SkillGroup {
        title: "Programming Languages",
        items: &[
            "Python (Advanced)",
            "SQL",
            "JavaScript (Intermediate)",
            "R (Basic)",
        ],
    },
    SkillGroup {
        title: "Frameworks & Libraries",
        items: &[
            "Streamlit",
            "Pandas, NumPy, Scikit-learn",
            "TensorFlow / PyTorch",
            "Flask / Django (if applicable)",
            "React (if applicable)",
        ],
    },
    SkillGroup {
        title: "Tools & Platforms",
        items: &[
            "Git, GitHub",
            "Docker",
            "AWS / GCP / Azure (basic)",
            "VS Code",
            "Jupyter Notebooks",
        ],
    },
];

/// Static link on a project card.
#[derive(Debug, Clone, Copy)]
pub struct ProjectLink {
    pub label: &'static str,
    pub url: &'static str,
}

/// A project card, optionally with a simulated demo button.
#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub links: &'static [ProjectLink],
    pub simulation: Option<SimulationKind>,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "1. Interactive Dashboard with Streamlit",
        description: "Developed a dynamic dashboard to visualize sales data, allowing users to \
                      filter by date range, product category, and region. Utilized Pandas for \
                      data processing and Plotly for interactive visualizations.",
        links: &[
            ProjectLink {
                label: "View Code >",
                url: "https://github.com/yourgithub/dashboard-project",
            },
            ProjectLink {
                label: "Live Demo >",
                url: "https://yourdashboard.streamlit.app",
            },
        ],
        simulation: Some(SimulationKind::DashboardLoad),
    },
    Project {
        title: "2. Machine Learning Model for Customer Churn Prediction",
        description: "Built and deployed a customer churn prediction model using scikit-learn. \
                      Preprocessed customer data, trained a classification model (e.g., \
                      RandomForest), and evaluated its performance.",
        links: &[
            ProjectLink {
                label: "View Code >",
                url: "https://github.com/yourgithub/churn-prediction",
            },
            ProjectLink {
                label: "Read Blog Post (if any) >",
                url: "https://yourblog.com/churn-prediction-post",
            },
        ],
        simulation: Some(SimulationKind::ModelTraining),
    },
    Project {
        title: "3. Web Scraping Tool for Research",
        description: "Created a Python script using Beautiful Soup and Requests to extract \
                      specific data from multiple websites for academic research purposes. \
                      Included error handling and data storage in CSV format.",
        links: &[ProjectLink {
            label: "View Code >",
            url: "https://github.com/yourgithub/web-scraper",
        }],
        simulation: None,
    },
];
