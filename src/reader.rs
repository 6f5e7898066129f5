//! Bounded, restartable enumeration of entries already persisted to a sink.
//!
//! Verification code (and tests) read a sink back newest-first and only care
//! about entries up to some boundary, typically "written after the test
//! started". [`records_while`] wraps a [`RecordSource`] in a pull-based
//! iterator that stops permanently once the caller's predicate fails, so an
//! unbounded sink query never turns into an unbounded scan.

use crate::entry_class::EntryClass;

use jiff::Timestamp;

/// One entry read back from a sink, newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkRecord {
    /// The source/provider the entry was written under.
    pub provider: String,
    pub time_created: Timestamp,
    pub class: EntryClass,
    pub message: String,
}

/// Query collaborator over a sink's persisted entries.
///
/// `read_next` yields entries newest-first and `None` at the end.
/// `rewind` restarts the query from the newest entry, making the sequence
/// restartable.
pub trait RecordSource {
    type Error: std::error::Error + 'static;

    fn read_next(&mut self) -> Result<Option<SinkRecord>, Self::Error>;
    fn rewind(&mut self) -> Result<(), Self::Error>;
}

/// Iterator over a record source, bounded by a caller-supplied predicate.
///
/// Fuses once the predicate rejects a record, the source is exhausted, or an
/// error is yielded.
pub struct BoundedRecords<'a, S, P> {
    source: &'a mut S,
    keep: P,
    done: bool,
}

/// Reads records from `source` while `keep` accepts them.
pub fn records_while<S, P>(source: &mut S, keep: P) -> BoundedRecords<'_, S, P>
where
    S: RecordSource,
    P: FnMut(&SinkRecord) -> bool,
{
    BoundedRecords {
        source,
        keep,
        done: false,
    }
}

impl<S, P> Iterator for BoundedRecords<'_, S, P>
where
    S: RecordSource,
    P: FnMut(&SinkRecord) -> bool,
{
    type Item = Result<SinkRecord, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.source.read_next() {
            Ok(Some(record)) => {
                if (self.keep)(&record) {
                    Some(Ok(record))
                } else {
                    self.done = true;
                    None
                }
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
