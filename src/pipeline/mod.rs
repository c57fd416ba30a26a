//! Transaction pipeline handoff.
//!
//! The pipeline receives confirmed transfer intents and owns everything after
//! that: transaction construction, signing, submission. This crate only
//! records the handoff.

use crate::model::PipelineError;
use crate::state::TransferIntent;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Consumer of transfer intents.
pub trait TransactionPipeline: Send {
    /// Hand off one intent.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError` if the intent could not be delivered.
    fn submit(&mut self, intent: &TransferIntent) -> Result<(), PipelineError>;
}

/// One line of the intent log.
#[derive(Debug, Serialize)]
pub struct PipelineRecord<'a> {
    pub created_at: DateTime<Utc>,
    pub intent: &'a TransferIntent,
}

impl<'a> PipelineRecord<'a> {
    pub fn new(intent: &'a TransferIntent, created_at: DateTime<Utc>) -> Self {
        Self { created_at, intent }
    }
}

/// Appends each intent as one JSON line to a file.
#[derive(Debug, Clone)]
pub struct JsonlPipeline {
    path: PathBuf,
}

impl JsonlPipeline {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionPipeline for JsonlPipeline {
    fn submit(&mut self, intent: &TransferIntent) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let record = PipelineRecord::new(intent, Utc::now());
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        info!(
            items = intent.item_count(),
            recipient = %intent.recipient(),
            path = %self.path.display(),
            "Transfer intent handed off"
        );
        Ok(())
    }
}

/// Keeps intents in memory. For embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingPipeline {
    pub submitted: Vec<TransferIntent>,
    /// When set, every submit fails with this I/O error kind.
    pub fail_with: Option<std::io::ErrorKind>,
}

impl TransactionPipeline for RecordingPipeline {
    fn submit(&mut self, intent: &TransferIntent) -> Result<(), PipelineError> {
        if let Some(kind) = self.fail_with {
            return Err(std::io::Error::new(kind, "pipeline unavailable").into());
        }
        self.submitted.push(intent.clone());
        Ok(())
    }
}
