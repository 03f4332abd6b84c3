//! The create/edit/delete dialog behind each admin content tab.
//!
//! ```text
//! Idle --open_create/open_edit--> Editing --submit--> Validating
//! Validating --invalid--> Editing
//! Validating --valid--> Submitting --ok--> Idle (list reloaded)
//! Submitting --err--> Editing (draft kept)
//! Editing --cancel--> Idle (draft discarded)
//! Idle --delete(confirmed)--> Deleting --> Idle (list reloaded)
//! ```
//!
//! `Validating` and `Submitting` only exist while `submit` runs. `Submitting`
//! spans the store write, so it is what remains if that future is dropped.

use super::{notice::Notice, title_case};
use crate::{
    entities::{Deletable, Draft, Entity, HasHighlights, HasImage},
    errors::{StoreError, UploadError},
    providers::upload::{ImageFile, ImageUploader},
    repository::EntityRepository,
    validation::Validation,
};
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum FormState<D> {
    Idle,
    /// `target` is the record being edited, `None` when creating.
    Editing { draft: D, target: Option<String> },
    /// Held only inside [`FormController::submit`] while the draft is checked.
    /// Validation is synchronous, so callers never observe this state: a
    /// rejected draft is back in `Editing` by the time `submit` returns.
    Validating { draft: D, target: Option<String> },
    Submitting { draft: D, target: Option<String> },
    Deleting { target: String },
}

/// The state without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Editing,
    Validating,
    Submitting,
    Deleting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Saved { id: String, created: bool },
    Rejected(Validation),
    Failed(StoreError),
    /// `submit` was called with no dialog open.
    NotEditing,
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation prompt was declined; nothing was written.
    Declined,
    Failed(StoreError),
    /// Another write is still in flight.
    Busy,
}

#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded(String),
    Failed(UploadError),
    NotEditing,
}

#[derive(Debug)]
pub struct FormController<E: Entity> {
    repo: EntityRepository<E>,
    records: Vec<E>,
    state: FormState<E::Draft>,
    uploading: bool,
    notices: Vec<Notice>,
}

impl<E: Entity> FormController<E> {
    pub fn new(repo: EntityRepository<E>) -> Self {
        Self {
            repo,
            records: Vec::new(),
            state: FormState::Idle,
            uploading: false,
            notices: Vec::new(),
        }
    }

    /// The last successfully loaded list, newest first.
    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn state(&self) -> &FormState<E::Draft> {
        &self.state
    }

    pub fn phase(&self) -> FormPhase {
        match self.state {
            FormState::Idle => FormPhase::Idle,
            FormState::Editing { .. } => FormPhase::Editing,
            FormState::Validating { .. } => FormPhase::Validating,
            FormState::Submitting { .. } => FormPhase::Submitting,
            FormState::Deleting { .. } => FormPhase::Deleting,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains the pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Reloads the list. On failure the previous list is kept and an error
    /// notice is raised.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        match self.repo.list_newest_first().await {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                self.notify(Notice::error(
                    "Error",
                    format!("Failed to load {}s. Please try again.", E::LABEL),
                ));
                Err(e)
            }
        }
    }

    /// Opens an empty dialog. Replaces any draft already open.
    pub fn open_create(&mut self) {
        self.state = FormState::Editing {
            draft: E::Draft::default(),
            target: None,
        };
    }

    /// Opens the dialog pre-filled from a loaded record. Returns `false` when
    /// the id is not in the current list.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.records.iter().find(|r| r.id() == id) else {
            warn!(collection = E::COLLECTION, %id, "Edit requested for unknown record");
            return false;
        };
        self.state = FormState::Editing {
            draft: record.to_draft(),
            target: Some(id.to_string()),
        };
        true
    }

    pub fn draft(&self) -> Option<&E::Draft> {
        match &self.state {
            FormState::Editing { draft, .. }
            | FormState::Validating { draft, .. }
            | FormState::Submitting { draft, .. } => Some(draft),
            FormState::Idle | FormState::Deleting { .. } => None,
        }
    }

    /// The open draft, editable only while no submit is in flight.
    pub fn draft_mut(&mut self) -> Option<&mut E::Draft> {
        match &mut self.state {
            FormState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Closes the dialog without writing anything.
    pub fn cancel(&mut self) {
        if self.phase() != FormPhase::Idle {
            self.state = FormState::Idle;
        }
    }

    /// Validates and writes the open draft: an add when creating, a field
    /// replacement when editing (optional fields left empty are cleared).
    pub async fn submit(&mut self) -> SubmitOutcome {
        let (mut draft, target) = match std::mem::replace(&mut self.state, FormState::Idle) {
            FormState::Editing { draft, target } => (draft, target),
            other => {
                self.state = other;
                return SubmitOutcome::NotEditing;
            }
        };

        self.state = FormState::Validating {
            draft: draft.clone(),
            target: target.clone(),
        };
        let validation = draft.validate();
        if !validation.is_valid() {
            self.notify(Notice::error(
                "Validation Error",
                format!(
                    "Please fill in all required fields: {}.",
                    validation.fields().join(", ")
                ),
            ));
            self.state = FormState::Editing { draft, target };
            return SubmitOutcome::Rejected(validation);
        }

        draft.normalize();
        self.state = FormState::Submitting {
            draft: draft.clone(),
            target: target.clone(),
        };
        let written = match &target {
            Some(id) => self
                .repo
                .replace_fields(id, &draft)
                .await
                .map(|()| (id.clone(), false)),
            None => self.repo.add(draft.clone()).await.map(|id| (id, true)),
        };

        match written {
            Ok((id, created)) => {
                let (title, verb) = if created {
                    ("Added", "added")
                } else {
                    ("Updated", "updated")
                };
                self.notify(Notice::success(
                    format!("{} {title}", title_case(E::LABEL)),
                    format!("The {} has been {verb} successfully.", E::LABEL),
                ));
                self.state = FormState::Idle;
                // A failed reload already raised its own notice.
                let _ = self.load().await;
                SubmitOutcome::Saved { id, created }
            }
            Err(e) => {
                self.notify(Notice::error(
                    "Error",
                    format!("Failed to save {}. Please try again.", E::LABEL),
                ));
                self.state = FormState::Editing { draft, target };
                SubmitOutcome::Failed(e)
            }
        }
    }
}

impl<E: Deletable> FormController<E> {
    /// Deletes a record after the caller's confirmation prompt. A declined
    /// prompt writes nothing.
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> DeleteOutcome {
        if !confirmed {
            return DeleteOutcome::Declined;
        }
        if matches!(
            self.phase(),
            FormPhase::Validating | FormPhase::Submitting | FormPhase::Deleting
        ) {
            return DeleteOutcome::Busy;
        }

        let previous = std::mem::replace(
            &mut self.state,
            FormState::Deleting {
                target: id.to_string(),
            },
        );
        match self.repo.delete(id).await {
            Ok(()) => {
                self.notify(Notice::success(
                    format!("{} Deleted", title_case(E::LABEL)),
                    format!("The {} has been deleted successfully.", E::LABEL),
                ));
                self.state = FormState::Idle;
                let _ = self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.notify(Notice::error(
                    "Error",
                    format!("Failed to delete {}. Please try again.", E::LABEL),
                ));
                self.state = previous;
                DeleteOutcome::Failed(e)
            }
        }
    }
}

impl<E> FormController<E>
where
    E: Entity,
    E::Draft: HasImage,
{
    /// Uploads a picked file and writes the hosted URL into the open draft.
    /// On failure the draft's image is left untouched.
    pub async fn upload_image(&mut self, uploader: &dyn ImageUploader, file: ImageFile) -> UploadOutcome {
        if self.draft_mut().is_none() {
            return UploadOutcome::NotEditing;
        }
        self.uploading = true;
        let file_name = file.file_name.clone();
        let result = uploader.upload(file).await;
        self.uploading = false;

        match result {
            Ok(url) => {
                if let Some(draft) = self.draft_mut() {
                    draft.set_image(url.clone());
                }
                info!(%file_name, %url, "Image uploaded");
                self.notify(Notice::success("Success", "Image uploaded successfully."));
                UploadOutcome::Uploaded(url)
            }
            Err(e) => {
                warn!(%file_name, "Image upload failed: {e}");
                self.notify(Notice::error(
                    "Error",
                    "Failed to upload image. Please try again.",
                ));
                UploadOutcome::Failed(e)
            }
        }
    }
}

impl<E> FormController<E>
where
    E: Entity,
    E::Draft: HasHighlights,
{
    /// Appends a highlight to the open draft. Blank text is ignored.
    pub fn add_highlight(&mut self, text: &str) -> bool {
        self.draft_mut()
            .is_some_and(|draft| draft.highlights_mut().push(text))
    }

    pub fn edit_highlight(&mut self, index: usize, text: &str) -> bool {
        self.draft_mut()
            .is_some_and(|draft| draft.highlights_mut().replace(index, text))
    }

    pub fn remove_highlight(&mut self, index: usize) -> Option<String> {
        self.draft_mut()
            .and_then(|draft| draft.highlights_mut().remove(index))
    }
}
