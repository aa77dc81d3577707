// src/lib.rs

//! Storefront admin: catalog and order administration for a boutique
//! storefront.
//!
//! Two subsystems share one flow, render → user action → remote mutation →
//! re-fetch → re-render, with no local cache of remote records:
//!  - The catalog manager drafts product rows, uploads their images to the
//!    asset host, persists products and renders them grouped by category with
//!    inline edit and delete.
//!  - The order viewer lists orders with computed totals and moves them
//!    through pending → processed / deleted, one at a time or all at once.
//!
//! Multi-step operations run as named-step workflows (see [`workflow`]).
//! [`AdminConsole`] is the entry point: build it with
//! [`AdminConsole::from_config`] and send it [`AdminCommand`]s.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod notice;
pub mod orders;
pub mod render;
pub mod store;
pub mod workflow;

pub use crate::config::{AdminConfig, BackendKind};
pub use crate::console::{AdminCommand, AdminConsole, BatchOutcome, CommandOutcome, Confirmation};
pub use crate::error::{AdminError, FailureKind, Result};
pub use crate::notice::{MessageArea, Notice, NoticeKind};
