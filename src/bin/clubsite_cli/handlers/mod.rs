#![deny(clippy::all, clippy::pedantic)]

pub mod admin;
pub mod blog;
pub mod forum;
