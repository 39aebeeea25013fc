//! Core library components.
//!
//! This module contains the reconciliation logic: context and credential
//! resolution, globals merging, and the files they read and write.

pub mod cloud;
pub mod config;
pub mod constants;
pub mod context;
pub mod credentials;
pub mod domain;
pub mod git;
pub mod merge;
pub mod options;
pub mod prep;
pub mod secrets;
pub mod snapshot;
pub mod state;
