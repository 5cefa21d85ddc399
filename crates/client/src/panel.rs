//! View-model for one resource screen.
//!
//! A panel lists rows, edits them through a single shared modal that is
//! either closed, creating, or editing one id, and deletes only after an
//! explicit confirmation. Every edit starts from a fresh fetch; nothing is
//! cached between calls and concurrent editors overwrite each other.

use campusdesk_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ClientError, ResourceApi};

/// A resource the panel can show and edit.
pub trait PanelResource: DeserializeOwned + Send + Sync + 'static {
    /// Modal contents sent on create and update.
    type Form: Serialize + Default + Clone + Send + Sync + 'static;

    /// Path segment under `/api` (`"student"`).
    const PATH: &'static str;
    /// Column headers, in [`PanelResource::cells`] order.
    const HEADERS: &'static [&'static str];

    fn id(&self) -> DbId;

    /// Display text for each column.
    fn cells(&self) -> Vec<String>;

    /// Form pre-filled from a stored row.
    fn to_form(&self) -> Self::Form;
}

/// What the shared modal is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Closed,
    Create,
    Edit(DbId),
}

/// Rendered table: one header row plus one row of cells per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub struct ResourcePanel<R: PanelResource, A> {
    api: A,
    rows: Vec<R>,
    modal: ModalMode,
    form: R::Form,
    filter: Option<String>,
    pending_delete: Option<DbId>,
    last_error: Option<String>,
}

impl<R: PanelResource, A: ResourceApi<R>> ResourcePanel<R, A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            rows: Vec::new(),
            modal: ModalMode::Closed,
            form: R::Form::default(),
            filter: None,
            pending_delete: None,
            last_error: None,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn modal(&self) -> ModalMode {
        self.modal
    }

    pub fn form(&self) -> &R::Form {
        &self.form
    }

    /// Edit the open modal's fields.
    pub fn form_mut(&mut self) -> &mut R::Form {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<DbId> {
        self.pending_delete
    }

    /// Server message of the last failed call, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Filter applied by [`ResourcePanel::load`]. Blank text clears it.
    pub fn set_filter(&mut self, filter: Option<&str>) {
        self.filter = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
    }

    /// Fetch the list and replace the current rows.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let result = self.api.list(self.filter.as_deref()).await;
        let rows = self.track(result)?;
        self.rows = rows;
        Ok(())
    }

    /// Open the modal with an empty form.
    pub fn open_create(&mut self) {
        self.form = R::Form::default();
        self.modal = ModalMode::Create;
    }

    /// Fetch the row fresh and open the modal on it.
    pub async fn open_edit(&mut self, id: DbId) -> Result<(), ClientError> {
        let result = self.api.get(id).await;
        let row = self.track(result)?;
        self.form = row.to_form();
        self.modal = ModalMode::Edit(id);
        Ok(())
    }

    /// Send the form as a create or an update, then close the modal and
    /// reload. On failure the modal stays open with the form intact.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let result = match self.modal {
            ModalMode::Closed => Err(ClientError::InvalidState("No form is open")),
            ModalMode::Create => self.api.create(&self.form).await.map(|id| {
                tracing::debug!(path = R::PATH, id, "Created");
            }),
            ModalMode::Edit(id) => self.api.update(id, &self.form).await.map(|()| {
                tracing::debug!(path = R::PATH, id, "Updated");
            }),
        };
        self.track(result)?;
        self.close_modal();
        self.load().await
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalMode::Closed;
        self.form = R::Form::default();
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: DbId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the row awaiting confirmation and drop it from the list
    /// without reloading.
    pub async fn confirm_delete(&mut self) -> Result<(), ClientError> {
        let Some(id) = self.pending_delete.take() else {
            return self.track(Err(ClientError::InvalidState("No delete is pending")));
        };
        let result = self.api.delete(id).await;
        self.track(result)?;
        self.rows.retain(|row| row.id() != id);
        Ok(())
    }

    pub fn table(&self) -> TableView {
        TableView {
            header: R::HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: self.rows.iter().map(PanelResource::cells).collect(),
        }
    }

    /// Remember the outcome of a call for display.
    fn track<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => {
                tracing::warn!(path = R::PATH, error = %err, "Request failed");
                self.last_error = Some(err.to_string());
            }
        }
        result
    }
}
