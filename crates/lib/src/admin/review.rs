use super::notice::Notice;
use crate::{
    entities::{Reviewable, StatusUpdate},
    errors::StoreError,
    repository::EntityRepository,
};

/// List plus detail view for bookings and visa applications. Records are
/// never edited here, only moved between statuses.
#[derive(Debug)]
pub struct StatusReview<E: Reviewable> {
    repo: EntityRepository<E>,
    records: Vec<E>,
    selected: Option<String>,
    notices: Vec<Notice>,
}

impl<E: Reviewable> StatusReview<E> {
    pub fn new(repo: EntityRepository<E>) -> Self {
        Self {
            repo,
            records: Vec::new(),
            selected: None,
            notices: Vec::new(),
        }
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn load(&mut self) -> Result<(), StoreError> {
        match self.repo.list_newest_first().await {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                self.notices.push(Notice::error(
                    "Error",
                    format!("Failed to load {}s. Please try again.", E::LABEL),
                ));
                Err(e)
            }
        }
    }

    /// Opens the detail view of a loaded record.
    pub fn select(&mut self, id: &str) -> Option<&E> {
        let record = self.records.iter().find(|r| r.id() == id)?;
        self.selected = Some(id.to_string());
        Some(record)
    }

    pub fn selected(&self) -> Option<&E> {
        let id = self.selected.as_deref()?;
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Writes only the `status` field, then reloads the list.
    pub async fn set_status(&mut self, id: &str, status: E::Status) -> Result<(), StoreError> {
        match self.repo.update(id, &StatusUpdate { status }).await {
            Ok(()) => {
                self.notices.push(Notice::success(
                    "Status Updated",
                    format!("The {} has been marked {status}.", E::LABEL),
                ));
                let _ = self.load().await;
                Ok(())
            }
            Err(e) => {
                self.notices.push(Notice::error(
                    "Error",
                    format!("Failed to update {} status. Please try again.", E::LABEL),
                ));
                Err(e)
            }
        }
    }
}
