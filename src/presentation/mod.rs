//! Plain-text rendering of view state for the terminal client.

pub mod admin;
pub mod blog;
pub mod forum;
