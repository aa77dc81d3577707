// tests/workflow_tests.rs
mod common;

use common::setup_tracing;
use serial_test::serial;
use std::sync::Arc;
use storefront_admin::workflow::{ContextData, Pipeline, RunOutcome, SkipCondition, StepControl, WorkflowError, Workflows};
use storefront_admin::AdminError;

#[derive(Clone, Debug, Default)]
struct Tally {
  steps: Vec<String>,
  stop_at: Option<String>,
}

fn record(
  step: &'static str,
) -> impl Fn(ContextData<Tally>) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<StepControl, AdminError>> + Send>>
     + Send
     + Sync
     + 'static {
  move |ctx: ContextData<Tally>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.steps.push(step.to_string());
      if guard.stop_at.as_deref() == Some(step) {
        return Ok(StepControl::Stop);
      }
      Ok(StepControl::Continue)
    })
  }
}

fn three_steps() -> Pipeline<Tally, AdminError> {
  let mut p = Pipeline::<Tally, AdminError>::new(&[("one", false, None), ("two", false, None), ("three", false, None)]);
  p.on_step("one", record("one")).unwrap();
  p.on_step("two", record("two")).unwrap();
  p.on_step("three", record("three")).unwrap();
  p
}

#[tokio::test]
#[serial]
async fn test_steps_run_in_declared_order() {
  setup_tracing();
  let ctx = ContextData::new(Tally::default());
  assert_eq!(three_steps().run(ctx.clone()).await.unwrap(), RunOutcome::Completed);
  assert_eq!(ctx.read().steps, vec!["one", "two", "three"]);
}

#[tokio::test]
#[serial]
async fn test_stop_halts_remaining_steps() {
  setup_tracing();
  let ctx = ContextData::new(Tally {
    stop_at: Some("two".into()),
    ..Default::default()
  });
  assert_eq!(three_steps().run(ctx.clone()).await.unwrap(), RunOutcome::Stopped);
  assert_eq!(ctx.read().steps, vec!["one", "two"]);
}

#[tokio::test]
#[serial]
async fn test_handler_error_halts_and_propagates() {
  setup_tracing();
  let mut p = Pipeline::<Tally, AdminError>::new(&[("good", false, None), ("bad", false, None), ("never", false, None)]);
  p.on_step("good", record("good")).unwrap();
  p.on_step("bad", |_ctx: ContextData<Tally>| async move {
    Err::<StepControl, _>(AdminError::Validation("bad input".into()))
  })
  .unwrap();
  p.on_step("never", record("never")).unwrap();

  let ctx = ContextData::new(Tally::default());
  let err = p.run(ctx.clone()).await.unwrap_err();
  assert!(matches!(err, AdminError::Validation(ref m) if m == "bad input"));
  assert_eq!(ctx.read().steps, vec!["good"]);
}

#[tokio::test]
#[serial]
async fn test_skip_condition_and_optional_steps() {
  setup_tracing();
  let skip: SkipCondition<Tally> = Arc::new(|ctx: &ContextData<Tally>| !ctx.read().steps.is_empty());
  let mut p = Pipeline::<Tally, AdminError>::new(&[
    ("first", false, None),
    ("skipped", false, Some(skip)),
    ("optional_without_handler", true, None),
    ("last", false, None),
  ]);
  p.on_step("first", record("first")).unwrap();
  p.on_step("skipped", record("skipped")).unwrap();
  p.on_step("last", record("last")).unwrap();

  let ctx = ContextData::new(Tally::default());
  assert_eq!(p.run(ctx.clone()).await.unwrap(), RunOutcome::Completed);
  assert_eq!(ctx.read().steps, vec!["first", "last"]);
}

#[tokio::test]
#[serial]
async fn test_missing_handler_on_required_step_fails() {
  setup_tracing();
  let p = Pipeline::<Tally, AdminError>::new(&[("lonely", false, None)]);
  let err = p.run(ContextData::new(Tally::default())).await.unwrap_err();
  assert!(matches!(
    err,
    AdminError::Workflow {
      source: WorkflowError::HandlerMissing { ref step_name }
    } if step_name == "lonely"
  ));
}

#[tokio::test]
#[serial]
async fn test_handlers_only_attach_to_declared_steps() {
  setup_tracing();
  let mut p = three_steps();
  assert!(matches!(
    p.on_step("four", record("four")),
    Err(WorkflowError::StepNotFound { step_name }) if step_name == "four"
  ));
  p.on_step("two", record("two_again")).unwrap();

  let ctx = ContextData::new(Tally::default());
  p.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().steps, vec!["one", "two", "two_again", "three"]);
}

#[tokio::test]
#[serial]
async fn test_registry_dispatches_by_context_type() {
  setup_tracing();
  let workflows = Workflows::<AdminError>::new();

  let err = workflows.run(ContextData::new(Tally::default())).await.unwrap_err();
  assert!(matches!(
    err,
    AdminError::Workflow {
      source: WorkflowError::NotRegistered { .. }
    }
  ));

  workflows.register(three_steps());
  let ctx = ContextData::new(Tally::default());
  assert_eq!(workflows.run(ctx.clone()).await.unwrap(), RunOutcome::Completed);
  assert_eq!(ctx.read().steps.len(), 3);
}

#[tokio::test]
#[serial]
async fn test_take_moves_data_out_of_the_context() {
  setup_tracing();
  let ctx = ContextData::new(Tally {
    steps: vec!["a".into()],
    stop_at: None,
  });
  let taken = ctx.take(|t| &mut t.steps);
  assert_eq!(taken, vec!["a"]);
  assert!(ctx.read().steps.is_empty());
  assert_eq!(ctx.map_read(|t| &t.stop_at).as_deref(), None);
}
