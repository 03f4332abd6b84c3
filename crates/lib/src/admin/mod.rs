//! # Admin Controllers
//!
//! In-memory state machines behind the admin panel. A [`FormController`] owns
//! the record list and the open dialog for one editable kind; a
//! [`StatusReview`] does the same for kinds that are only ever status-updated.
//! Neither talks to a UI: outcomes come back as values and as [`Notice`]s.

pub mod form;
pub mod notice;
pub mod review;

pub use form::{DeleteOutcome, FormController, FormPhase, FormState, SubmitOutcome, UploadOutcome};
pub use notice::{Notice, NoticeLevel};
pub use review::StatusReview;

/// `"travel moment"` -> `"Travel Moment"`.
pub(crate) fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::title_case;

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("travel moment"), "Travel Moment");
        assert_eq!(title_case("offer"), "Offer");
    }
}
