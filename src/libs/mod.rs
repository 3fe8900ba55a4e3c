//! Core library modules.
//!
//! The reporting engine lives in [`window`], [`event`], [`palette`],
//! [`aggregate`], [`summary`] and [`report`]; [`pipeline`] wires them to an
//! event source and a sink. The rest is application plumbing.

pub mod aggregate;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod event;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod palette;
pub mod pipeline;
pub mod report;
pub mod secret;
pub mod summary;
pub mod view;
pub mod window;
