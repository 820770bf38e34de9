//! Tourviz - tourism statistics data core.
//!
//! Cleans locale-formatted CSV sources, loads them into an immutable
//! session store and exposes the aggregation, geo-resolution and export
//! functions the dashboard pages are built on.

pub mod analysis;
pub mod config;
pub mod data;
pub mod export;
pub mod geo;
pub mod views;
