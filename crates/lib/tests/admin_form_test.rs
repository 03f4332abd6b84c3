//! # Admin Form Controller Tests

mod common;

use common::{memory_repos, setup_tracing, ReadOnlyStore};
use nisa::admin::{DeleteOutcome, FormController, FormPhase, StatusReview, SubmitOutcome};
use nisa::entities::{
    ApplicationStatus, OfferDraft, Package, PackageDraft, UmrahApplication, UmrahApplicationDraft,
};
use nisa::providers::store::memory::MemoryStore;
use nisa::repository::Repositories;

fn complete_package(title: &str) -> PackageDraft {
    PackageDraft {
        title: title.into(),
        image: "https://img.test/p.jpg".into(),
        duration: "5 Days".into(),
        rating: 4.5,
        price: "$999".into(),
        location: "Dubai, UAE".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_missing_field_blocks_submit_until_filled() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    repos.packages.add(complete_package("Existing")).await.unwrap();

    let mut form = FormController::<Package>::new(repos.packages.clone());
    form.load().await.unwrap();
    let prior_newest = form.records()[0].created_at;

    form.open_create();
    *form.draft_mut().unwrap() = PackageDraft {
        location: String::new(),
        ..complete_package("Oman Road Trip")
    };

    let outcome = form.submit().await;
    match outcome {
        SubmitOutcome::Rejected(validation) => assert_eq!(validation.fields(), vec!["location"]),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(repos.packages.list().await.unwrap().len(), 1);
    assert!(form.notices().last().unwrap().is_error());

    form.draft_mut().unwrap().location = "Muscat, Oman".into();
    let outcome = form.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Saved { created: true, .. }));
    assert_eq!(form.phase(), FormPhase::Idle);

    let records = form.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].details.title, "Oman Road Trip");
    assert!(records[0].created_at > prior_newest);
}

#[tokio::test]
async fn test_edit_updates_in_place_and_keeps_created_at() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let id = repos.packages.add(complete_package("Old Title")).await.unwrap();

    let mut form = FormController::<Package>::new(repos.packages.clone());
    form.load().await.unwrap();
    let created_at = form.records()[0].created_at;

    assert!(form.open_edit(&id));
    assert_eq!(form.draft().unwrap().title, "Old Title");
    form.draft_mut().unwrap().title = "New Title".into();
    let outcome = form.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Saved { created: false, .. }));

    let stored = repos.packages.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.details.title, "New Title");
    assert_eq!(stored.created_at, created_at);
    assert_eq!(form.records().len(), 1);
}

#[tokio::test]
async fn test_edit_can_clear_optional_fields() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let id = repos
        .packages
        .add(PackageDraft {
            description: Some("Old description".into()),
            group_size: Some("2-8".into()),
            ..complete_package("Desert Safari")
        })
        .await
        .unwrap();

    let mut form = FormController::<Package>::new(repos.packages.clone());
    form.load().await.unwrap();
    assert!(form.open_edit(&id));
    assert_eq!(
        form.draft().unwrap().description.as_deref(),
        Some("Old description")
    );
    form.draft_mut().unwrap().description = None;
    assert!(matches!(
        form.submit().await,
        SubmitOutcome::Saved { created: false, .. }
    ));

    let stored = repos.packages.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.details.description, None);
    assert_eq!(stored.details.group_size.as_deref(), Some("2-8"));
    assert_eq!(form.records()[0].details.description, None);
}

#[tokio::test]
async fn test_cancel_discards_draft_without_writing() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let mut form = FormController::<Package>::new(repos.packages.clone());

    form.open_create();
    form.draft_mut().unwrap().title = "Never saved".into();
    form.cancel();

    assert_eq!(form.phase(), FormPhase::Idle);
    assert!(form.draft().is_none());
    assert!(matches!(form.submit().await, SubmitOutcome::NotEditing));
    assert!(repos.packages.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_write_keeps_draft_for_retry() {
    setup_tracing();
    let store = MemoryStore::new();
    let repos = Repositories::new(Box::new(ReadOnlyStore(store)));
    let mut form = FormController::<Package>::new(repos.packages.clone());

    form.open_create();
    *form.draft_mut().unwrap() = complete_package("Retry Me");
    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft().unwrap().title, "Retry Me");
    assert!(form.notices().last().unwrap().is_error());
}

#[tokio::test]
async fn test_offer_discount_is_recomputed_on_submit() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let mut form = FormController::<nisa::entities::Offer>::new(repos.offers.clone());

    form.open_create();
    *form.draft_mut().unwrap() = OfferDraft {
        title: "Summer".into(),
        image: "https://img.test/o.jpg".into(),
        description: "Beach week".into(),
        valid_until: "2025-08-31".into(),
        original_price: 100.0,
        discounted_price: 75.0,
        discount: 5,
        ..Default::default()
    };
    assert!(matches!(form.submit().await, SubmitOutcome::Saved { .. }));
    assert_eq!(form.records()[0].details.discount, 25);
}

#[tokio::test]
async fn test_highlight_editing_preserves_order() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let mut form = FormController::<Package>::new(repos.packages.clone());
    form.open_create();

    for h in ["A", "B", "C"] {
        assert!(form.add_highlight(h));
    }
    assert!(!form.add_highlight("   "));
    assert_eq!(form.remove_highlight(1).as_deref(), Some("B"));
    assert!(form.edit_highlight(1, "C2"));

    let highlights = form.draft().unwrap().highlights.as_slice().to_vec();
    assert_eq!(highlights, vec!["A".to_string(), "C2".to_string()]);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let id = repos.packages.add(complete_package("Keep?")).await.unwrap();
    let mut form = FormController::<Package>::new(repos.packages.clone());
    form.load().await.unwrap();

    assert!(matches!(form.delete(&id, false).await, DeleteOutcome::Declined));
    assert_eq!(repos.packages.list().await.unwrap().len(), 1);

    assert!(matches!(form.delete(&id, true).await, DeleteOutcome::Deleted));
    assert!(form.records().is_empty());
    assert_eq!(form.phase(), FormPhase::Idle);
}

#[tokio::test]
async fn test_failed_load_raises_notice_and_stays_empty() {
    setup_tracing();
    let repos = Repositories::new(Box::new(common::FailingStore));
    let mut form = FormController::<Package>::new(repos.packages);

    assert!(form.load().await.is_err());
    assert!(form.records().is_empty());
    let notices = form.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Failed to load packages. Please try again.");
}

#[tokio::test]
async fn test_status_review_updates_only_status() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let id = repos
        .umrah_applications
        .add(UmrahApplicationDraft {
            name: "Fatima".into(),
            email: "fatima@example.com".into(),
            phone: "+971500000000".into(),
            passport_number: "P1234567".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut review = StatusReview::<UmrahApplication>::new(repos.umrah_applications.clone());
    review.load().await.unwrap();
    assert_eq!(review.records()[0].status, ApplicationStatus::Pending);
    assert!(review.select(&id).is_some());

    review.set_status(&id, ApplicationStatus::Approved).await.unwrap();
    let selected = review.selected().unwrap();
    assert_eq!(selected.status, ApplicationStatus::Approved);
    assert_eq!(selected.applicant.passport_number, "P1234567");
    assert_eq!(review.notices()[0].title, "Status Updated");
}
