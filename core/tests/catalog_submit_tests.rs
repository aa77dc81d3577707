// tests/catalog_submit_tests.rs
mod common;

use common::*;
use serial_test::serial;
use storefront_admin::catalog::{DraftRowInput, RowId};
use storefront_admin::model::Category;
use storefront_admin::{AdminCommand, AdminError, CommandOutcome, FailureKind, NoticeKind};

fn fill(h: &Harness, row: RowId, name: &str, price: &str, file: Option<&str>) {
  h.console
    .update_draft_row(
      row,
      DraftRowInput {
        name: Some(name.to_string()),
        price: Some(price.to_string()),
        image: file.map(image),
      },
    )
    .unwrap();
}

/// Three rows named A, B, C with images a.jpg, b.jpg, c.jpg.
fn three_complete_rows(h: &Harness) -> Vec<RowId> {
  let first = h.console.draft_previews()[0].row;
  let rows = vec![first, h.console.add_draft_row(), h.console.add_draft_row()];
  for (row, (name, file)) in rows.iter().zip([("A", "a.jpg"), ("B", "b.jpg"), ("C", "c.jpg")]) {
    fill(h, *row, name, "2500", Some(file));
  }
  rows
}

fn submit(category: Option<Category>) -> AdminCommand {
  AdminCommand::SubmitBatch { category }
}

#[tokio::test]
#[serial]
async fn test_incomplete_rows_are_skipped_without_remote_calls() {
  setup_tracing();
  let h = harness();
  let first = h.console.draft_previews()[0].row;
  let second = h.console.add_draft_row();
  let third = h.console.add_draft_row();
  fill(&h, first, "Only a name", "", None);
  fill(&h, second, "No image", "3000", None);
  fill(&h, third, "", "3000", Some("x.jpg"));

  let outcome = h.console.dispatch(submit(Some(Category::Tops))).await.unwrap();

  let CommandOutcome::BatchSubmitted(batch) = outcome else {
    panic!("unexpected outcome {:?}", outcome);
  };
  assert!(batch.persisted.is_empty());
  assert_eq!(batch.skipped, vec![first, second, third]);
  assert!(h.assets.uploads().is_empty());
  assert!(h.store.creates().is_empty());
  // Nothing was submitted, so the drafts stay.
  assert_eq!(h.console.draft_previews().len(), 3);
}

#[tokio::test]
#[serial]
async fn test_mixed_rows_upload_only_complete_ones() {
  setup_tracing();
  let h = harness();
  let first = h.console.draft_previews()[0].row;
  let second = h.console.add_draft_row();
  fill(&h, first, "Denim jacket", "abc", Some("skip.jpg"));
  fill(&h, second, "Maxi gown", "18000", Some("gown.jpg"));

  let outcome = h.console.dispatch(submit(Some(Category::Gowns))).await.unwrap();

  let CommandOutcome::BatchSubmitted(batch) = outcome else {
    panic!("unexpected outcome {:?}", outcome);
  };
  assert_eq!(h.assets.uploads(), vec!["gown.jpg"]);
  assert_eq!(h.store.creates(), vec!["Maxi gown"]);
  assert_eq!(batch.skipped, vec![first]);
  assert_eq!(batch.persisted[0].category, "gowns");
  assert_eq!(batch.persisted[0].price, 18000.0);
  assert!(batch.persisted[0].created_at.is_some());
}

#[tokio::test]
#[serial]
async fn test_valid_rows_persist_in_order_and_reset_board() {
  setup_tracing();
  let h = harness();
  three_complete_rows(&h);
  assert_eq!(h.previews.live_count(), 3);

  let outcome = h.console.dispatch(submit(Some(Category::Jeans))).await.unwrap();

  assert_eq!(h.assets.uploads(), vec!["a.jpg", "b.jpg", "c.jpg"]);
  assert_eq!(h.store.creates(), vec!["A", "B", "C"]);

  let drafts = h.console.draft_previews();
  assert_eq!(drafts.len(), 1);
  assert!(drafts[0].name.is_empty() && drafts[0].preview_url.is_none());
  assert_eq!(h.previews.live_count(), 0);

  let CommandOutcome::BatchSubmitted(batch) = outcome else {
    panic!("unexpected outcome {:?}", outcome);
  };
  let catalog = batch.catalog.expect("catalog reloaded");
  let jeans: Vec<&str> = catalog
    .section(Category::Jeans)
    .unwrap()
    .products
    .iter()
    .map(|p| p.name.as_str())
    .collect();
  // Newest first.
  assert_eq!(jeans, vec!["C", "B", "A"]);
  assert!(batch.persisted.iter().all(|p| p.image_url.starts_with("https://cdn.test/img/")));

  let notice = h.console.message().unwrap();
  assert_eq!(notice.kind, NoticeKind::Success);
  assert_eq!(notice.text, "Added 3 product(s) successfully!");
}

#[tokio::test]
#[serial]
async fn test_upload_failure_stops_the_batch_at_that_row() {
  setup_tracing();
  let h = harness();
  three_complete_rows(&h);
  h.assets.fail_on("b.jpg");

  let err = h.console.dispatch(submit(Some(Category::Tops))).await.unwrap_err();

  assert_eq!(err.kind(), FailureKind::Remote);
  assert!(matches!(err, AdminError::Upload(_)));
  assert_eq!(h.assets.uploads(), vec!["a.jpg", "b.jpg"]);
  assert_eq!(h.store.creates(), vec!["A"]);
  assert_eq!(h.store.memory().len(storefront_admin::store::Collection::Products), 1);
  // Drafts are kept for another attempt.
  assert_eq!(h.console.draft_previews().len(), 3);

  let notice = h.console.message().unwrap();
  assert_eq!(notice.kind, NoticeKind::Error);
  assert_eq!(notice.text, "Failed to add product.");
}

#[tokio::test]
#[serial]
async fn test_persist_failure_stops_the_batch_at_that_row() {
  setup_tracing();
  let h = harness();
  three_complete_rows(&h);
  h.store.fail_create_of("B");

  let err = h.console.dispatch(submit(Some(Category::Tops))).await.unwrap_err();

  assert!(matches!(err, AdminError::Store(_)));
  assert_eq!(h.assets.uploads(), vec!["a.jpg", "b.jpg"]);
  assert_eq!(h.store.creates(), vec!["A", "B"]);
  assert_eq!(h.store.memory().len(storefront_admin::store::Collection::Products), 1);
}

#[tokio::test]
#[serial]
async fn test_validation_runs_before_any_remote_call() {
  setup_tracing();
  let h = harness();
  three_complete_rows(&h);

  let err = h.console.dispatch(submit(None)).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::Validation);
  assert!(h.store.calls().is_empty());
  assert!(h.assets.uploads().is_empty());

  let empty = harness();
  let only_row = empty.console.draft_previews()[0].row;
  empty.console.remove_draft_row(only_row).unwrap();
  let err = empty.console.dispatch(submit(Some(Category::Tops))).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::Validation);
  assert!(empty.store.calls().is_empty());
  assert_eq!(empty.console.message().unwrap().text, "Add at least one product row");
}

#[tokio::test]
#[serial]
async fn test_overlapping_submits_persist_each_row_once() {
  setup_tracing();
  let h = harness();
  three_complete_rows(&h);

  let (first, second) = tokio::join!(
    h.console.dispatch(submit(Some(Category::Gowns))),
    h.console.dispatch(submit(Some(Category::Gowns))),
  );
  let persisted: Vec<usize> = [first.unwrap(), second.unwrap()]
    .into_iter()
    .map(|outcome| match outcome {
      CommandOutcome::BatchSubmitted(batch) => batch.persisted.len(),
      other => panic!("unexpected outcome {:?}", other),
    })
    .collect();

  assert_eq!(persisted, vec![3, 0]);
  assert_eq!(h.store.creates(), vec!["A", "B", "C"]);
  assert_eq!(h.assets.uploads(), vec!["a.jpg", "b.jpg", "c.jpg"]);
}
