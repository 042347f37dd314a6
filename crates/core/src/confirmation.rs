//! Recording of confirmed diagnoses.
//!
//! Durable storage is someone else's job. The core only defines the [`ConfirmationSink`] seam and
//! ships [`ConfirmationLog`], an in-memory sink for servers, the CLI and tests.

use crate::constants::DEFAULT_CONFIRMATION_LOG_CAPACITY;
use crate::{DiagnosisEntry, MapperError, MapperResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// Proof that a sink accepted a confirmed diagnosis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfirmationReceipt {
    pub id: Uuid,
    pub confirmed_at: DateTime<Utc>,
    pub entry: DiagnosisEntry,
}

impl ConfirmationReceipt {
    pub fn new(entry: DiagnosisEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            confirmed_at: Utc::now(),
            entry,
        }
    }
}

/// Destination for confirmed diagnoses.
pub trait ConfirmationSink: Send + Sync {
    /// Record one confirmed diagnosis.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::Confirmation` if the entry could not be recorded.
    fn record(&self, entry: &DiagnosisEntry) -> MapperResult<ConfirmationReceipt>;
}

/// Thread-safe in-memory list of the most recent receipts. Contents are lost when the process
/// exits.
///
/// The log holds at most `capacity` receipts; recording past that drops the oldest.
#[derive(Debug)]
pub struct ConfirmationLog {
    capacity: usize,
    receipts: Mutex<VecDeque<ConfirmationReceipt>>,
}

impl ConfirmationLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CONFIRMATION_LOG_CAPACITY)
    }

    /// Create a log keeping at most `capacity` receipts. A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            receipts: Mutex::new(VecDeque::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained receipts, oldest first.
    pub fn receipts(&self) -> Vec<ConfirmationReceipt> {
        match self.receipts.lock() {
            Ok(receipts) => receipts.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self.receipts.lock() {
            Ok(receipts) => receipts.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConfirmationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationSink for ConfirmationLog {
    fn record(&self, entry: &DiagnosisEntry) -> MapperResult<ConfirmationReceipt> {
        let receipt = ConfirmationReceipt::new(entry.clone());
        let mut receipts = self
            .receipts
            .lock()
            .map_err(|_| MapperError::Confirmation("confirmation log lock poisoned".into()))?;
        while receipts.len() >= self.capacity {
            receipts.pop_front();
        }
        receipts.push_back(receipt.clone());
        Ok(receipt)
    }
}
