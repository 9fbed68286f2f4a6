//! Single-page personal portfolio with Lottie animations and simulated demos.
//!
//! The page is rendered server-side. Animation assets are fetched from their
//! remote sources on every render and degrade to a notice when unavailable.

pub mod cli;
pub mod config;
pub mod http_client;
pub mod models;
pub mod server;
pub mod simulation;
pub mod style;
