// State management module
// Holds the immutable configuration shared by all request handlers

pub mod app_state;

pub use app_state::AppState;
