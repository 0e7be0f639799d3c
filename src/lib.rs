//! fovea: focus folding for outlined documents.
//!
//! Given a document whose lines carry a heading depth (`#`, `##`, ...), fovea keeps only the
//! heading under the cursor, its ancestors and its descendants open, and folds everything else.
//! Three commands drive it: focus on the current heading, and move focus to the next or previous
//! sibling heading.
//!
//! The core ([`heading`], [`navigate`], [`plan`]) is pure: text and a cursor line in, per-heading
//! visibility decisions out. [`surface`] applies those decisions to anything that can fold line
//! ranges, and [`buffer`] is the in-memory surface behind the terminal viewer.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod buffer;
pub mod config;
pub mod error;
pub mod heading;
pub mod logging;
pub mod navigate;
pub mod plan;
pub mod surface;
pub mod ui;
