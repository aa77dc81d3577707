// storefront_admin/src/workflow/control.rs

/// What a step handler wants the workflow to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  Continue,
  /// Halt the run here. Remaining handlers and steps do not execute.
  Stop,
}

/// How a workflow run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
  Completed,
  Stopped,
}
