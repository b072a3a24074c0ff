//! # folderhub-api
//!
//! HTTP API layer for FolderHub built on Axum.
//!
//! A thin routing surface over the hierarchy services: extractors resolve
//! the device key and validate bodies, handlers call one service operation
//! each, and [`AppError`](folderhub_core::AppError) is mapped to a status
//! code in one place.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
