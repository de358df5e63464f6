//! Authoring form over one content table.
//!
//! The editor keeps a local copy of the table, a draft, and a mode. Saves
//! and deletes are applied to the local copy as soon as the store confirms
//! them; [`Editor::reconcile`] then re-lists the table to catch anything the
//! local copy missed (for example, writes from another session).

use std::sync::Arc;

use teamunited_core::error::CoreError;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::{DbId, Timestamp};
use teamunited_core::validation::Validate;
use teamunited_db::store::{Record, Table};

use crate::error::{AdminError, AdminResult};

/// What the form is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Adding,
    /// `loaded_updated_at` is the row's `updated_at` when the draft was
    /// loaded, used to flag concurrent edits.
    Editing {
        id: DbId,
        loaded_updated_at: Timestamp,
    },
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SaveOutcome<E> {
    pub record: E,
    /// Someone else changed the row after the draft was loaded. The save
    /// still went through (last write wins).
    pub stale: bool,
}

/// Add/edit/delete form for records of type `E`.
pub struct Editor<E: Record> {
    table: Arc<dyn Table<E>>,
    records: Vec<E>,
    mode: Mode,
    draft: E::Create,
    needs_reconcile: bool,
}

impl<E: Record> Editor<E> {
    pub fn new(table: Arc<dyn Table<E>>) -> Self {
        Self {
            table,
            records: Vec::new(),
            mode: Mode::Idle,
            draft: E::Create::default(),
            needs_reconcile: false,
        }
    }

    /// Local copy of the table, newest first.
    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draft(&self) -> &E::Create {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut E::Create {
        &mut self.draft
    }

    /// A save or delete has been applied locally but not yet reconciled.
    pub fn needs_reconcile(&self) -> bool {
        self.needs_reconcile
    }

    /// Replace the local copy with a full listing.
    pub async fn refresh(&mut self) -> AdminResult<()> {
        self.records = self.table.list(&ListQuery::all()).await?;
        self.needs_reconcile = false;
        Ok(())
    }

    /// Start a new record from the table's defaults.
    pub fn begin_add(&mut self) {
        self.draft = E::Create::default();
        self.mode = Mode::Adding;
    }

    /// Load a record from the local copy into the draft.
    pub fn begin_edit(&mut self, id: DbId) -> AdminResult<()> {
        let record = self.local(id)?;
        let draft = record.to_draft();
        let loaded_updated_at = record.updated_at();
        self.draft = draft;
        self.mode = Mode::Editing {
            id,
            loaded_updated_at,
        };
        Ok(())
    }

    /// Drop the draft and return to idle.
    pub fn cancel(&mut self) {
        self.draft = E::Create::default();
        self.mode = Mode::Idle;
    }

    /// Validate the draft and write it. On failure the mode and draft are
    /// kept so the form can be corrected.
    pub async fn save(&mut self) -> AdminResult<SaveOutcome<E>> {
        let outcome = match self.mode {
            Mode::Idle => return Err(AdminError::NotEditing),
            Mode::Adding => {
                let mut input = self.draft.clone();
                input.normalize();
                input.validate()?;
                let record = self.table.create(&input).await?;
                tracing::info!(entity = E::ENTITY, id = record.id(), "Record created");
                self.records.insert(0, record.clone());
                SaveOutcome {
                    record,
                    stale: false,
                }
            }
            Mode::Editing {
                id,
                loaded_updated_at,
            } => {
                let mut input = E::Update::from(self.draft.clone());
                input.normalize();
                input.validate()?;

                let stale = self
                    .table
                    .find_by_id(id)
                    .await?
                    .is_some_and(|current| current.updated_at() > loaded_updated_at);
                if stale {
                    tracing::warn!(entity = E::ENTITY, id, "Overwriting a concurrent edit");
                }

                let record = self
                    .table
                    .update(id, &input)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: E::ENTITY,
                        id,
                    })?;
                tracing::info!(entity = E::ENTITY, id, "Record updated");
                match self.records.iter_mut().find(|r| r.id() == id) {
                    Some(slot) => *slot = record.clone(),
                    None => self.records.insert(0, record.clone()),
                }
                SaveOutcome { record, stale }
            }
        };

        self.cancel();
        self.needs_reconcile = true;
        Ok(outcome)
    }

    /// Delete a record after `confirm` approves it. Returns `false` if the
    /// confirmation declined and nothing was touched.
    pub async fn delete<F>(&mut self, id: DbId, confirm: F) -> AdminResult<bool>
    where
        F: FnOnce(&E) -> bool,
    {
        if !confirm(self.local(id)?) {
            return Ok(false);
        }

        self.table.delete(id).await?;
        tracing::info!(entity = E::ENTITY, id, "Record deleted");

        self.records.retain(|r| r.id() != id);
        if matches!(self.mode, Mode::Editing { id: editing, .. } if editing == id) {
            self.cancel();
        }
        self.needs_reconcile = true;
        Ok(true)
    }

    /// Re-list the table and replace the local copy. Returns `true` if the
    /// local copy had drifted from the store.
    pub async fn reconcile(&mut self) -> AdminResult<bool> {
        let fresh = self.table.list(&ListQuery::all()).await?;
        let drifted = fingerprint(&fresh) != fingerprint(&self.records);
        if drifted {
            tracing::debug!(entity = E::ENTITY, "Local copy drifted from the store");
        }
        self.records = fresh;
        self.needs_reconcile = false;
        Ok(drifted)
    }

    fn local(&self, id: DbId) -> AdminResult<&E> {
        self.records.iter().find(|r| r.id() == id).ok_or_else(|| {
            CoreError::NotFound {
                entity: E::ENTITY,
                id,
            }
            .into()
        })
    }
}

fn fingerprint<E: Record>(records: &[E]) -> Vec<(DbId, Timestamp)> {
    records.iter().map(|r| (r.id(), r.updated_at())).collect()
}
