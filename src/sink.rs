//! Glue between the chunker and a fixed-record-size sink writer.
//!
//! The actual persistent sink (platform event log, file, network) is a
//! collaborator behind [`EntryWriter`]; this module owns the per-target
//! configuration and the chunk-then-write loop.

use crate::chunk::{OverflowAction, chunk_message};
use crate::entry_class::{EntryClass, resolve_entry_class};
use crate::err::SinkError;
use crate::layout::LogEvent;

use log::trace;

/// Sink collaborator: persists one bounded entry under a classification.
pub trait EntryWriter {
    type Error: std::error::Error + 'static;

    fn write_entry(&mut self, text: &str, class: EntryClass) -> Result<(), Self::Error>;
}

/// A sink adapter for targets with a maximum single-entry size.
///
/// Configuration follows the builder idiom:
///
/// ```
/// # use evsink::{BoundedSink, EntryClass, EntryWriter, OverflowAction};
/// # struct Nop;
/// # impl EntryWriter for Nop {
/// #     type Error = std::io::Error;
/// #     fn write_entry(&mut self, _: &str, _: EntryClass) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// let sink = BoundedSink::new(Nop, 16384)
///     .with_overflow_action(OverflowAction::Split)
///     .with_entry_class_override("SuccessAudit");
/// ```
#[derive(Debug, Clone)]
pub struct BoundedSink<W> {
    writer: W,
    max_entry_size: usize,
    on_overflow: OverflowAction,
    /// Optional rendered classification override; unparseable text falls
    /// back to the severity-derived class.
    entry_class_override: Option<String>,
}

impl<W: EntryWriter> BoundedSink<W> {
    pub fn new(writer: W, max_entry_size: usize) -> Self {
        BoundedSink {
            writer,
            max_entry_size,
            on_overflow: OverflowAction::default(),
            entry_class_override: None,
        }
    }

    pub fn with_overflow_action(mut self, action: OverflowAction) -> Self {
        self.on_overflow = action;
        self
    }

    pub fn with_entry_class_override(mut self, override_text: impl Into<String>) -> Self {
        self.entry_class_override = Some(override_text.into());
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Writes an event's message, chunked per the configured overflow
    /// action, one `write_entry` call per chunk in original order. Returns
    /// the number of entries written; zero means the message was dropped
    /// under [`OverflowAction::Ignore`], which is not an error.
    pub fn write_event(&mut self, event: &LogEvent) -> Result<usize, SinkError<W::Error>> {
        let class = resolve_entry_class(event.level, self.entry_class_override.as_deref());
        self.write_message(&event.message, class)
    }

    /// As [`write_event`](Self::write_event), for an already-rendered
    /// message and resolved classification.
    pub fn write_message(
        &mut self,
        message: &str,
        class: EntryClass,
    ) -> Result<usize, SinkError<W::Error>> {
        let chunks = chunk_message(message, self.max_entry_size, self.on_overflow)?;
        let total = chunks.len();

        for chunk in &chunks {
            self.writer
                .write_entry(chunk.text, class)
                .map_err(|source| SinkError::Write {
                    position: chunk.position,
                    total,
                    source,
                })?;
        }

        if total == 0 {
            trace!("message dropped by overflow action, nothing written");
        }
        Ok(total)
    }
}
