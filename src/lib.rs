//! Client core for the club website: schema-driven admin CRUD, the forum's
//! category → post → reply model, and the session-gated admin shell.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
