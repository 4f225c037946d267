//! ActionLens Library
//!
//! This crate inventories the GitHub Actions referenced by the workflows of an
//! organization: which actions are used, at which versions, how often, and where.
//!
//! The pipeline is: a [`providers::ContentSource`] lists repositories and workflow
//! files, [`workflow`] extracts `uses` references from each document,
//! [`aggregate`] folds them into organization-wide counts, and [`report`] turns
//! the aggregate into deterministic report structures.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod providers;
pub mod report;
pub mod scanner;
pub mod utils;
pub mod workflow;

pub use error::ActionLensError;
