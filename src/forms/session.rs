//! Load/edit/submit lifecycle of an admin form

use std::future::Future;
use tracing::{error, info, warn};

use crate::types::{CmsError, Result};

/// Where a form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Waiting for the record; submission is blocked
    Loading,
    Editing,
    /// A mutation is in flight; submission is blocked
    Submitting,
    /// Submitted; the page navigates away
    Completed,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mutation succeeded; go back to the listing
    Navigate(&'static str),
    /// Mutation failed and was logged; the form is editable again, unchanged
    Reenabled,
}

/// A form bound to one record
#[derive(Debug)]
pub struct EditSession<F> {
    phase: FormPhase,
    form: Option<F>,
    listing_path: &'static str,
}

impl<F: Clone> EditSession<F> {
    /// Edit page: waiting for the record to load
    pub fn loading(listing_path: &'static str) -> Self {
        Self {
            phase: FormPhase::Loading,
            form: None,
            listing_path,
        }
    }

    /// Create page: editable immediately
    pub fn editing(form: F, listing_path: &'static str) -> Self {
        Self {
            phase: FormPhase::Editing,
            form: Some(form),
            listing_path,
        }
    }

    /// The record arrived. Only a `Loading` session accepts it; a late
    /// load never replaces edits or reopens a submitted form.
    pub fn loaded(&mut self, form: F) -> Result<()> {
        if self.phase != FormPhase::Loading {
            warn!("Ignoring late load for {} in {:?}", self.listing_path, self.phase);
            return Err(CmsError::FormBusy("form is already loaded"));
        }
        self.form = Some(form);
        self.phase = FormPhase::Editing;
        Ok(())
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn form(&self) -> Option<&F> {
        self.form.as_ref()
    }

    /// Replace the form with `update(form)`
    pub fn edit(&mut self, update: impl FnOnce(F) -> F) -> Result<()> {
        self.ensure_editing()?;
        if let Some(form) = self.form.take() {
            self.form = Some(update(form));
        }
        Ok(())
    }

    /// Enter `Submitting` and hand out the state to send
    pub fn begin_submit(&mut self) -> Result<F> {
        self.ensure_editing()?;
        let form = self
            .form
            .clone()
            .ok_or(CmsError::FormBusy("form has no record loaded"))?;
        self.phase = FormPhase::Submitting;
        Ok(form)
    }

    /// Leave `Submitting` with the mutation's result
    pub fn finish_submit<T>(&mut self, result: Result<T>) -> SubmitOutcome {
        match result {
            Ok(_) => {
                self.phase = FormPhase::Completed;
                info!("Form submitted, returning to {}", self.listing_path);
                SubmitOutcome::Navigate(self.listing_path)
            }
            Err(e) => {
                error!("Failed to submit form for {}: {}", self.listing_path, e);
                self.phase = FormPhase::Editing;
                SubmitOutcome::Reenabled
            }
        }
    }

    /// Run `op` on the current form state
    pub async fn submit<T, Fut>(&mut self, op: impl FnOnce(F) -> Fut) -> Result<SubmitOutcome>
    where
        Fut: Future<Output = Result<T>>,
    {
        let form = self.begin_submit()?;
        let result = op(form).await;
        Ok(self.finish_submit(result))
    }

    fn ensure_editing(&self) -> Result<()> {
        match self.phase {
            FormPhase::Editing => Ok(()),
            FormPhase::Loading => Err(CmsError::FormBusy("form is still loading")),
            FormPhase::Submitting => Err(CmsError::FormBusy("form is being submitted")),
            FormPhase::Completed => Err(CmsError::FormBusy("form was already submitted")),
        }
    }
}
