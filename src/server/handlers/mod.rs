//! HTTP request handlers for the web server.

mod page;
mod simulations;
mod static_files;

// Re-export handlers for use by the router
pub use page::{healthz, not_found, portfolio_page};
pub use simulations::{cancel_simulation, simulation_status, start_simulation};
pub use static_files::{serve_css, serve_js};
