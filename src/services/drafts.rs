use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::store::{get_json, set_json, KeyValueStore, StoreError};
use crate::core::DomainKind;
use crate::models::FormData;

/// Per-domain form drafts and last submissions kept in a [`KeyValueStore`]
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the draft with the current field snapshot
    pub fn save(&self, domain: DomainKind, form: &FormData) -> Result<(), StoreError> {
        set_json(self.store.as_ref(), &domain.draft_key(), form)
    }

    /// The stored draft, limited to non-empty fields
    pub fn load(&self, domain: DomainKind) -> Result<Option<FormData>, StoreError> {
        let draft: Option<FormData> = get_json(self.store.as_ref(), &domain.draft_key())?;
        Ok(draft.map(|form| form.filled()))
    }

    pub fn clear(&self, domain: DomainKind) -> Result<(), StoreError> {
        self.store.delete(&domain.draft_key())
    }

    /// Remember the last successfully submitted form
    pub fn record_submission(&self, domain: DomainKind, form: &FormData) -> Result<(), StoreError> {
        set_json(self.store.as_ref(), &domain.submission_key(), form)
    }

    pub fn last_submission(&self, domain: DomainKind) -> Result<Option<FormData>, StoreError> {
        get_json(self.store.as_ref(), &domain.submission_key())
    }
}

/// Periodic draft writer.
///
/// Clients stage snapshots as the visitor types; staged snapshots reach the
/// store on the next tick, or immediately through [`Autosave::flush`] when
/// the visitor navigates away. A successful submission discards both the
/// staged and the stored draft. Whichever operation runs last wins.
pub struct Autosave {
    drafts: DraftStore,
    staged: Mutex<HashMap<DomainKind, FormData>>,
}

impl Autosave {
    pub fn new(drafts: DraftStore) -> Self {
        Self {
            drafts,
            staged: Mutex::new(HashMap::new()),
        }
    }

    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    /// Start the background writer; the first write happens one period from now
    pub fn spawn(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let autosave = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval() fires immediately once
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let written = autosave.flush_all().await;
                if written > 0 {
                    tracing::debug!("Auto-saved {} draft(s)", written);
                }
            }
        })
    }

    pub async fn stage(&self, domain: DomainKind, form: FormData) {
        self.staged.lock().await.insert(domain, form);
    }

    pub async fn is_staged(&self, domain: DomainKind) -> bool {
        self.staged.lock().await.contains_key(&domain)
    }

    /// Write the staged snapshot for one domain now. Returns whether anything was staged.
    pub async fn flush(&self, domain: DomainKind) -> Result<bool, StoreError> {
        let staged = self.staged.lock().await.remove(&domain);
        match staged {
            Some(form) => {
                self.drafts.save(domain, &form)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write every staged snapshot; failures are logged and the snapshot dropped.
    pub async fn flush_all(&self) -> usize {
        let staged: Vec<_> = self.staged.lock().await.drain().collect();

        let mut written = 0;
        for (domain, form) in staged {
            match self.drafts.save(domain, &form) {
                Ok(()) => written += 1,
                Err(e) => tracing::warn!("Failed to auto-save {} draft: {}", domain, e),
            }
        }
        written
    }

    /// Forget the draft after a successful submission
    pub async fn discard(&self, domain: DomainKind) -> Result<(), StoreError> {
        self.staged.lock().await.remove(&domain);
        self.drafts.clear(domain)
    }
}
