pub mod articles;
pub mod generation_task;
pub mod protocol;
pub mod rest;
pub mod router;
pub mod seed;
pub mod settings;
pub mod state;

// Re-export the router builder so the binary and the tests share one
// definition of the HTTP surface.
pub use router::build_router;
pub use state::AppState;
