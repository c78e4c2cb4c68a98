//! Terminal UI client for the todo service.
//!
//! The interesting part lives in [`cache`] and [`controller`]: a local
//! cache keyed by `(filter, search)` and an optimistic mutation layer
//! that predicts toggle/delete results locally, commits them to the
//! server, and reconciles by revalidating the active query.

pub mod api_client;
pub mod cache;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod events;
pub mod keys;
pub mod notifications;
pub mod persistence;
pub mod state;
pub mod store;
pub mod theme;
pub mod views;
pub mod widgets;
