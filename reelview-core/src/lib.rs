//! ReelView Core: movie detail model shared by the TUI and the CLI.
//!
//! This crate contains everything that is not terminal-specific:
//! - Domain types (raw API payloads, display models, movie identifiers)
//! - Fetch slots: the idle/loading/success/error state machine with stale-response rejection
//! - Framework-neutral view model for the detail page and its cast/reviews outlet
//! - Explicit navigation (routes, locations, opaque navigation state)
//! - Data providers (TMDB over HTTP, JSON fixtures on disk)
//! - Configuration and logging setup

pub mod config;
pub mod data;
pub mod domain;
pub mod fetch;
pub mod navigation;
pub mod telemetry;
pub mod view;
