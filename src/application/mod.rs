//! Application services: controllers that hold view state and talk to the
//! backend through the port traits in [`ports`].

pub mod auth;
pub mod binding;
pub mod blog;
pub mod confirm;
pub mod crud;
pub mod error;
pub mod forum;
pub mod ports;
pub mod sequence;
pub mod shell;
