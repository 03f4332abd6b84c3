//! # Public Display Tests

mod common;

use common::{memory_repos, setup_tracing, FailingStore};
use nisa::display::{FeedSource, PublicFeed};
use nisa::entities::{MomentVisibility, Offer, Package, PackageDraft, TravelMoment, TravelMomentDraft};
use nisa::providers::store::DocumentStore;
use nisa::repository::Repositories;
use serde_json::json;

#[tokio::test]
async fn test_unreachable_store_shows_samples() {
    setup_tracing();
    let repos = Repositories::new(Box::new(FailingStore));

    let mut packages = PublicFeed::<Package>::new(repos.packages.clone());
    assert!(packages.records().is_empty());
    assert_eq!(packages.source(), None);
    assert_eq!(packages.load().await.len(), 4);
    assert_eq!(packages.source(), Some(FeedSource::Fallback));

    let mut offers = PublicFeed::<Offer>::new(repos.offers.clone());
    let loaded = offers.load().await;
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].details.discount, 25);

    let mut moments = PublicFeed::<TravelMoment>::new(repos.travel_moments.clone());
    assert_eq!(moments.load().await.len(), 8);
}

#[tokio::test]
async fn test_empty_collection_is_shown_empty() {
    setup_tracing();
    let (_store, repos) = memory_repos();

    let mut packages = PublicFeed::<Package>::new(repos.packages.clone());
    assert!(packages.load().await.is_empty());
    assert_eq!(packages.source(), Some(FeedSource::Live));
}

#[tokio::test]
async fn test_live_records_newest_first() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    for title in ["Older", "Newer"] {
        repos
            .packages
            .add(PackageDraft {
                title: title.into(),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let mut feed = PublicFeed::<Package>::new(repos.packages.clone());
    let titles: Vec<String> = feed
        .load()
        .await
        .iter()
        .map(|p| p.details.title.clone())
        .collect();
    assert_eq!(titles, vec!["Newer".to_string(), "Older".to_string()]);
}

#[tokio::test]
async fn test_hidden_moments_are_not_shown() {
    setup_tracing();
    let (_store, repos) = memory_repos();
    let mut ids = Vec::new();
    for location in ["Hatta", "Fujairah"] {
        let draft = TravelMomentDraft {
            image: format!("https://img.test/{location}.jpg"),
            alt: location.to_string(),
            location: location.to_string(),
            ..Default::default()
        };
        ids.push(repos.travel_moments.add(draft).await.unwrap());
    }
    repos
        .travel_moments
        .update(&ids[0], &MomentVisibility { is_active: false })
        .await
        .unwrap();

    let mut feed = PublicFeed::<TravelMoment>::new(repos.travel_moments.clone());
    let shown = feed.load().await;
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].details.location, "Fujairah");
}

#[tokio::test]
async fn test_one_bad_record_does_not_trigger_fallback() {
    setup_tracing();
    let (store, repos) = memory_repos();
    repos
        .packages
        .add(PackageDraft {
            title: "Live Package".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    store
        .set("packages/-Nstub", json!({ "status": "pending" }))
        .await
        .unwrap();

    let mut feed = PublicFeed::<Package>::new(repos.packages.clone());
    feed.load().await;
    let shown = feed.records();
    assert_eq!(feed.source(), Some(FeedSource::Live));
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].details.title, "Live Package");
}
