// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod health;
mod metrics;
mod root;
mod track;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Middleware
pub use track::track_http_metrics;
