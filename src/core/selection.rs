//! The set of currency codes the user wants to see.
//!
//! On the first run every published code is selected and the store is marked
//! initialized. Later runs load the saved selection and prune codes that are
//! no longer published; if nothing survives, the first-run default applies
//! again. An empty selection means "no restriction" to the filter, which is
//! what `deselect_all` leaves behind.

use crate::core::currency::Currency;
use crate::core::storage::{
    IS_INITIALIZED_KEY, PreferenceStorage, Record, SELECTED_CURRENCIES_KEY, decode_code_set,
    encode_code_set,
};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SelectionStore {
    storage: Arc<dyn PreferenceStorage>,
    selected: BTreeSet<String>,
    known: BTreeSet<String>,
}

impl SelectionStore {
    pub fn new(storage: Arc<dyn PreferenceStorage>) -> Self {
        Self {
            storage,
            selected: BTreeSet::new(),
            known: BTreeSet::new(),
        }
    }

    /// Reconciles the saved selection with the currently published codes.
    pub async fn initialize(&mut self, currencies: &[Currency]) -> &BTreeSet<String> {
        self.known = currencies.iter().map(|c| c.code.clone()).collect();

        if !self.is_initialized().await {
            info!("First run: selecting all {} currencies", self.known.len());
            self.selected = self.known.clone();
            let mut record = Record::new();
            record.insert(
                SELECTED_CURRENCIES_KEY.to_string(),
                encode_code_set(&self.selected),
            );
            record.insert(IS_INITIALIZED_KEY.to_string(), Value::Bool(true));
            self.save(record).await;
            return &self.selected;
        }

        let saved = self.load().await;
        let repaired: BTreeSet<String> = saved.intersection(&self.known).cloned().collect();

        if repaired.is_empty() {
            debug!(
                "No saved selection matches the published codes, selecting all {}",
                self.known.len()
            );
            self.selected = self.known.clone();
            self.save_selection().await;
        } else if repaired.len() != saved.len() {
            debug!(
                "Pruned {} unpublished codes from the selection",
                saved.len() - repaired.len()
            );
            self.selected = repaired;
            self.save_selection().await;
        } else {
            self.selected = repaired;
        }

        &self.selected
    }

    /// Flips `code` in the selection. Returns whether it is selected afterwards.
    pub async fn toggle(&mut self, code: &str) -> bool {
        let now_selected = if self.selected.remove(code) {
            false
        } else {
            self.selected.insert(code.to_string());
            true
        };
        self.save_selection().await;
        now_selected
    }

    /// Selects every code seen by the last `initialize`.
    pub async fn select_all(&mut self) {
        self.selected = self.known.clone();
        self.save_selection().await;
    }

    pub async fn deselect_all(&mut self) {
        self.selected.clear();
        self.save_selection().await;
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.contains(code)
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    async fn is_initialized(&self) -> bool {
        if !self.storage.is_available() {
            return false;
        }
        match self.storage.get(&[IS_INITIALIZED_KEY]).await {
            Ok(record) => record.get(IS_INITIALIZED_KEY) == Some(&Value::Bool(true)),
            Err(e) => {
                warn!("Failed to check initialization status: {}", e);
                false
            }
        }
    }

    async fn load(&self) -> BTreeSet<String> {
        if !self.storage.is_available() {
            return BTreeSet::new();
        }
        match self.storage.get(&[SELECTED_CURRENCIES_KEY]).await {
            Ok(record) => decode_code_set(record.get(SELECTED_CURRENCIES_KEY)),
            Err(e) => {
                warn!("Failed to load selection: {}", e);
                BTreeSet::new()
            }
        }
    }

    async fn save_selection(&self) {
        let mut record = Record::new();
        record.insert(
            SELECTED_CURRENCIES_KEY.to_string(),
            encode_code_set(&self.selected),
        );
        self.save(record).await;
    }

    /// Write failures are logged; the in-memory selection is kept either way.
    async fn save(&self, record: Record) {
        if !self.storage.is_available() {
            return;
        }
        if let Err(e) = self.storage.set(record).await {
            warn!("Failed to save selection: {}", e);
        }
    }
}
