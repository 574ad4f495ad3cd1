//! HTTP clients for downstream services.

mod downstream;

pub use downstream::{DownstreamSettings, HttpDownstreamSources};
