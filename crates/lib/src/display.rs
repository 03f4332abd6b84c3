//! # Public Display
//!
//! Read-only feeds for the public pages. A failed read never surfaces as an
//! error: the page shows the built-in sample records instead.

use crate::{
    entities::{Offer, Package, TravelMoment},
    repository::EntityRepository,
    samples::FallbackSamples,
};
use serde::Serialize;
use tracing::warn;

/// Kinds shown on public pages.
pub trait PublicContent: FallbackSamples {
    /// Whether a stored record may be shown to visitors.
    fn is_visible(&self) -> bool {
        true
    }
}

impl PublicContent for Package {}

impl PublicContent for Offer {}

impl PublicContent for TravelMoment {
    fn is_visible(&self) -> bool {
        self.is_active
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Live,
    Fallback,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FeedState<E> {
    Loading,
    Loaded { records: Vec<E>, source: FeedSource },
}

#[derive(Debug)]
pub struct PublicFeed<E: PublicContent> {
    repo: EntityRepository<E>,
    state: FeedState<E>,
}

impl<E: PublicContent> PublicFeed<E> {
    pub fn new(repo: EntityRepository<E>) -> Self {
        Self {
            repo,
            state: FeedState::Loading,
        }
    }

    pub fn state(&self) -> &FeedState<E> {
        &self.state
    }

    /// Empty while loading.
    pub fn records(&self) -> &[E] {
        match &self.state {
            FeedState::Loading => &[],
            FeedState::Loaded { records, .. } => records,
        }
    }

    pub fn source(&self) -> Option<FeedSource> {
        match self.state {
            FeedState::Loading => None,
            FeedState::Loaded { source, .. } => Some(source),
        }
    }

    /// Reads the live collection, newest first and visible only. An empty
    /// live collection is shown as empty; only a failed read falls back.
    pub async fn load(&mut self) -> &[E] {
        self.state = FeedState::Loading;
        self.state = match self.repo.list_newest_first().await {
            Ok(records) => FeedState::Loaded {
                records: records.into_iter().filter(E::is_visible).collect(),
                source: FeedSource::Live,
            },
            Err(e) => {
                warn!("Error fetching {}s, showing samples: {e}", E::LABEL);
                FeedState::Loaded {
                    records: E::fallback_samples(),
                    source: FeedSource::Fallback,
                }
            }
        };
        self.records()
    }
}
