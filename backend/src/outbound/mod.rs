//! Driven adapters: persistence and downstream HTTP clients.

pub mod http;
pub mod persistence;
