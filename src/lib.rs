//! Support library for logging pipelines that feed fixed-record-size sinks
//! such as platform event logs.
//!
//! Two independent cores:
//!
//! - [`coerce`](coerce::coerce) turns the dynamically-typed result of
//!   rendering a layout into the strongly-typed value a caller requested,
//!   with explicit locale and error-policy parameters.
//! - [`chunk_message`](chunk::chunk_message) splits, truncates, or drops
//!   messages that exceed a sink's maximum entry size.
//!
//! Around them: the [`TypedLayout`] adapter over an external rendering step,
//! the [`BoundedSink`] chunk-then-write driver over an external
//! [`EntryWriter`], entry classification with severity-derived fallback, and
//! a bounded read-back iterator for verification.

pub mod chunk;
pub mod coerce;
pub mod entry_class;
pub mod err;
pub mod layout;
pub mod locale;
pub mod reader;
pub mod sink;
pub mod value;

pub use chunk::{Chunk, OverflowAction, chunk_message};
pub use coerce::{ErrorPolicy, coerce};
pub use entry_class::{EntryClass, Level, resolve_entry_class};
pub use err::{ChunkError, CoercionError, SinkError};
pub use layout::{LogEvent, PropertyRender, RenderValue, TypedLayout};
pub use locale::Locale;
pub use reader::{BoundedRecords, RecordSource, SinkRecord, records_while};
pub use sink::{BoundedSink, EntryWriter};
pub use value::{LayoutValue, PrimitiveKind, TypeDescriptor};
