// storefront_admin/src/workflow/mod.rs

//! Named-step async workflows over shared context data.
//!
//! A workflow is a [`Pipeline`] of named steps. Each step holds one or more
//! handlers; a handler gets a clone of the run's [`ContextData`], does its
//! work (usually remote I/O) and answers [`StepControl::Continue`] or
//! [`StepControl::Stop`]. Errors abort the run. Pipelines are registered in
//! a [`Workflows`] registry keyed by context type and run from there.

pub mod context_data;
pub mod control;
pub mod error;
pub mod execution;
pub mod pipeline;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{RunOutcome, StepControl};
pub use error::WorkflowError;
pub use pipeline::{Handler, Pipeline, StepSpec};
pub use registry::Workflows;
pub use step::{SkipCondition, StepDef};
