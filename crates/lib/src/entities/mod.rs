//! # Entity Model
//!
//! Every content kind lives in its own flat top-level collection, keyed by a
//! push id. A record is the submitted draft plus the fields the store stamps at
//! creation time (identifier, creation timestamp, and for some kinds an
//! initial status).

pub mod booking;
pub mod moment;
pub mod offer;
pub mod package;
pub mod umrah;

pub use booking::{Booking, BookingDraft, BookingStatus};
pub use moment::{MomentVisibility, TravelMoment, TravelMomentDraft};
pub use offer::{compute_discount, Offer, OfferDraft};
pub use package::{Package, PackageDraft};
pub use umrah::{ApplicationStatus, UmrahApplication, UmrahApplicationDraft};

use crate::{highlights::HighlightList, validation::Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// The user-editable part of a record, as filled in by a form.
pub trait Draft: Serialize + DeserializeOwned + Clone + Debug + Default + Send + Sync {
    /// Serialized keys of the `Option` fields, which are omitted when unset.
    /// An edit writes `null` for each of them that the draft leaves empty.
    const OPTIONAL_FIELDS: &'static [&'static str] = &[];

    /// Checks the fixed set of required fields for this kind.
    fn validate(&self) -> Validation;

    /// Recomputes derived fields. Called right before every write.
    fn normalize(&mut self) {}
}

/// A stored record of one entity kind.
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// The top-level collection path.
    const COLLECTION: &'static str;
    /// A human-readable noun used in notices ("package", "offer", ...).
    const LABEL: &'static str;

    type Draft: Draft + 'static;

    fn id(&self) -> &str;

    /// Epoch milliseconds at write time; used only for newest-first ordering.
    fn created_at(&self) -> i64;

    /// Builds the full record written on creation.
    fn from_draft(id: String, created_at: i64, draft: Self::Draft) -> Self;

    /// Extracts the editable fields, used to pre-populate an edit form.
    fn to_draft(&self) -> Self::Draft;
}

/// Marker for kinds that may be removed. Bookings and visa applications are
/// only ever status-updated.
pub trait Deletable: Entity {}

/// Drafts carrying an uploadable image URL.
pub trait HasImage {
    fn image(&self) -> &str;
    fn set_image(&mut self, url: String);
}

/// Drafts carrying an ordered highlight list.
pub trait HasHighlights {
    fn highlights_mut(&mut self) -> &mut HighlightList;
}

/// Kinds reviewed by status instead of edited (bookings, visa applications).
pub trait Reviewable: Entity {
    type Status: Serialize + DeserializeOwned + Copy + Debug + std::fmt::Display + Send + Sync + 'static;

    fn status(&self) -> Self::Status;
}

/// A partial update touching only `status`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StatusUpdate<S> {
    pub status: S,
}

/// Sorts records by creation time, newest first. Ties keep their store order.
pub fn sort_newest_first<E: Entity>(records: &mut [E]) {
    records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}
