//! Resume analysis service and its API consumer.
//!
//! The server half extracts text from uploaded resumes and scores them against
//! job descriptions; the client half calls that API and renders the reports.

pub mod analysis;
pub mod client;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod render;
pub mod routes;
pub mod state;
pub mod stats;
