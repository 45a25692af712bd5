//! Data layer sinks for analytics records.
//!
//! The data layer is the queue a tag manager drains. The storefront pushes
//! exactly one [`PurchaseRecord`] per confirmation view load; what happens
//! after the push is the consumer's business.

use std::io::Write;

use shopcart_core::PurchaseRecord;
use thiserror::Error;

/// Errors that can occur when pushing to a data layer.
#[derive(Debug, Error)]
pub enum DataLayerError {
    /// The record could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A queue of analytics records.
pub trait DataLayer {
    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns [`DataLayerError`] if the record cannot be delivered.
    fn push(&mut self, record: &PurchaseRecord) -> Result<(), DataLayerError>;
}

impl<D: DataLayer + ?Sized> DataLayer for &mut D {
    fn push(&mut self, record: &PurchaseRecord) -> Result<(), DataLayerError> {
        (**self).push(record)
    }
}

/// Keeps pushed records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataLayer {
    events: Vec<PurchaseRecord>,
}

impl MemoryDataLayer {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records pushed so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PurchaseRecord] {
        &self.events
    }

    /// Drain all records.
    pub fn take(&mut self) -> Vec<PurchaseRecord> {
        std::mem::take(&mut self.events)
    }
}

impl DataLayer for MemoryDataLayer {
    fn push(&mut self, record: &PurchaseRecord) -> Result<(), DataLayerError> {
        self.events.push(record.clone());
        Ok(())
    }
}

/// Writes each record as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesDataLayer<W> {
    writer: W,
}

impl<W: Write> JsonLinesDataLayer<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DataLayer for JsonLinesDataLayer<W> {
    fn push(&mut self, record: &PurchaseRecord) -> Result<(), DataLayerError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
