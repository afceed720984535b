//! Generic CRUD controller driven entirely by a [`ResourceBinding`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::application::binding::{ResourceBinding, ResourceKind};
use crate::application::confirm::Confirm;
use crate::application::error::AppError;
use crate::application::sequence::{LoadOutcome, RequestSequencer};
use crate::domain::entities::Record;
use crate::domain::schema::{EditBuffer, FieldSchema};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub buffer: EditBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Deleted,
    Cancelled,
}

#[derive(Debug, Default)]
struct CrudState {
    items: Vec<Record>,
    loading: bool,
    form: Option<FormState>,
    last_error: Option<String>,
}

#[derive(Debug)]
pub struct CrudController {
    binding: ResourceBinding,
    sequencer: RequestSequencer,
    state: Mutex<CrudState>,
}

impl CrudController {
    pub fn new(binding: ResourceBinding) -> Self {
        Self {
            binding,
            sequencer: RequestSequencer::new(),
            state: Mutex::new(CrudState::default()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.binding.kind()
    }

    pub fn schema(&self) -> &FieldSchema {
        self.binding.schema()
    }

    pub fn items(&self) -> Vec<Record> {
        self.state().items.clone()
    }

    pub fn item(&self, id: i64) -> Option<Record> {
        self.state().items.iter().find(|item| item.id == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn form(&self) -> Option<FormState> {
        self.state().form.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    /// Replaces the collection with the server's list, in server order.
    ///
    /// Only the response of the most recently issued load is applied. A failed
    /// load leaves the previous collection in place.
    pub async fn load_all(&self) -> Result<LoadOutcome, AppError> {
        let ticket = self.sequencer.issue();
        self.state().loading = true;

        let result = self.binding.api().list().await;
        if let Some(outcome) =
            LoadOutcome::from_admission(self.sequencer.admit(ticket, self.kind().path()))
        {
            if outcome == LoadOutcome::Detached {
                self.state().loading = false;
            }
            return Ok(outcome);
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                state.items = items;
                state.last_error = None;
                Ok(LoadOutcome::Applied { count })
            }
            Err(err) => {
                warn!(resource = %self.kind(), error = %err, "failed to load items");
                let err = AppError::operation("list items", err);
                state.last_error = Some(err.presentation_message().to_string());
                Err(err)
            }
        }
    }

    pub fn open_create_form(&self) -> EditBuffer {
        let buffer = self.schema().blank_buffer();
        self.state().form = Some(FormState {
            mode: FormMode::Create,
            buffer: buffer.clone(),
        });
        buffer
    }

    pub fn open_edit_form(&self, item: &Record) -> EditBuffer {
        let buffer = self.schema().buffer_from_record(item);
        self.state().form = Some(FormState {
            mode: FormMode::Edit { id: item.id },
            buffer: buffer.clone(),
        });
        buffer
    }

    pub fn cancel_form(&self) {
        self.state().form = None;
    }

    /// Applies raw operator input to the open form's buffer.
    pub fn set_field(&self, name: &str, raw: &str) -> Result<(), AppError> {
        let mut state = self.state();
        let form = state
            .form
            .as_mut()
            .ok_or(AppError::not_found("open form"))?;
        self.binding
            .schema()
            .apply_input(&mut form.buffer, name, raw)?;
        Ok(())
    }

    /// Updates the item being edited, or creates one, then refreshes the list.
    ///
    /// On failure the form stays open holding `buffer`.
    pub async fn submit(&self, buffer: EditBuffer) -> Result<(), AppError> {
        let mode = self
            .state()
            .form
            .as_ref()
            .map_or(FormMode::Create, |form| form.mode);

        if let Err(err) = self.schema().validate(&buffer) {
            self.keep_form(mode, buffer, err.to_string());
            return Err(err.into());
        }

        let api = self.binding.api();
        let result = match mode {
            FormMode::Edit { id } => api.update(id, &buffer).await,
            FormMode::Create => api.create(&buffer).await,
        };

        match result {
            Ok(()) => {
                info!(resource = %self.kind(), ?mode, "saved item");
                {
                    let mut state = self.state();
                    state.form = None;
                    state.last_error = None;
                }
                self.refresh_after_mutation().await;
                Ok(())
            }
            Err(err) => {
                warn!(resource = %self.kind(), ?mode, error = %err, "failed to save item");
                let err = AppError::operation("save item", err);
                self.keep_form(mode, buffer, err.presentation_message().to_string());
                Err(err)
            }
        }
    }

    /// Deletes `id` after confirmation; local items change only via the reload.
    pub async fn remove(&self, id: i64, confirm: &dyn Confirm) -> Result<RemoveOutcome, AppError> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(RemoveOutcome::Cancelled);
        }

        match self.binding.api().delete(id).await {
            Ok(()) => {
                info!(resource = %self.kind(), id, "deleted item");
                self.refresh_after_mutation().await;
                Ok(RemoveOutcome::Deleted)
            }
            Err(err) => {
                warn!(resource = %self.kind(), id, error = %err, "failed to delete item");
                let err = AppError::operation("delete item", err);
                self.state().last_error = Some(err.presentation_message().to_string());
                Err(err)
            }
        }
    }

    /// Tears the view down; in-flight loads no longer touch state.
    pub fn detach(&self) {
        self.sequencer.detach();
    }

    pub fn attach(&self) {
        self.sequencer.attach();
    }

    async fn refresh_after_mutation(&self) {
        // load_all records and logs its own failure.
        let _ = self.load_all().await;
    }

    fn keep_form(&self, mode: FormMode, buffer: EditBuffer, message: String) {
        let mut state = self.state();
        state.form = Some(FormState { mode, buffer });
        state.last_error = Some(message);
    }

    fn state(&self) -> MutexGuard<'_, CrudState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
