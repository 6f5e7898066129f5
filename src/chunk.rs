//! Splitting oversized messages for fixed-record-size sinks.
//!
//! Platform event logs cap the size of a single entry. Before handing a
//! rendered message to such a sink, callers pass it through
//! [`chunk_message`], which applies one of three overflow actions. Chunk
//! sizes count characters, and chunks always borrow from the original
//! message, so splitting never copies or re-encodes text.

use crate::err::{ChunkError, ChunkResult};

use log::trace;
use std::fmt;
use std::str::FromStr;

/// Strategy for messages that exceed the sink's maximum entry size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OverflowAction {
    /// Keep the first `max_chunk_size` characters, discard the rest.
    #[default]
    Truncate,
    /// Write the message as multiple consecutive entries.
    Split,
    /// Drop the whole message; never write a partial entry.
    Ignore,
}

impl FromStr for OverflowAction {
    type Err = UnknownOverflowAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("truncate") {
            Ok(OverflowAction::Truncate)
        } else if trimmed.eq_ignore_ascii_case("split") {
            Ok(OverflowAction::Split)
        } else if trimmed.eq_ignore_ascii_case("ignore") {
            Ok(OverflowAction::Ignore)
        } else {
            Err(UnknownOverflowAction {
                value: trimmed.to_string(),
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown overflow action `{value}`, expected truncate/split/ignore")]
pub struct UnknownOverflowAction {
    value: String,
}

/// One bounded fragment of a message, destined for a single sink write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Contiguous substring of the original message.
    pub text: &'a str,
    /// 1-based position in the split sequence.
    pub position: usize,
}

impl fmt::Display for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Splits `message` into ordered chunks of at most `max_chunk_size`
/// characters according to `action`.
///
/// A message of exactly `max_chunk_size` characters fits under every action
/// and comes back as a single chunk. An empty result is a normal outcome
/// under `Ignore` (and under `Split` for an empty message), meaning there is
/// nothing to write; it is never an error.
pub fn chunk_message(
    message: &str,
    max_chunk_size: usize,
    action: OverflowAction,
) -> ChunkResult<Vec<Chunk<'_>>> {
    if max_chunk_size == 0 {
        return Err(ChunkError::InvalidMaxSize { size: 0 });
    }

    let char_count = message.chars().count();

    if char_count <= max_chunk_size {
        return Ok(if message.is_empty() && action == OverflowAction::Split {
            Vec::new()
        } else {
            vec![Chunk {
                text: message,
                position: 1,
            }]
        });
    }

    match action {
        OverflowAction::Truncate => {
            let end = char_boundary_after(message, max_chunk_size);
            Ok(vec![Chunk {
                text: &message[..end],
                position: 1,
            }])
        }
        OverflowAction::Split => {
            let mut chunks = Vec::with_capacity(char_count.div_ceil(max_chunk_size));
            let mut rest = message;
            while !rest.is_empty() {
                let end = char_boundary_after(rest, max_chunk_size);
                chunks.push(Chunk {
                    text: &rest[..end],
                    position: chunks.len() + 1,
                });
                rest = &rest[end..];
            }
            trace!(
                "split {char_count} character message into {} entries of <= {max_chunk_size}",
                chunks.len()
            );
            Ok(chunks)
        }
        OverflowAction::Ignore => {
            trace!("dropping {char_count} character message over limit {max_chunk_size}");
            Ok(Vec::new())
        }
    }
}

/// Byte offset just past the `n`-th character, or the string's end if it has
/// fewer than `n` characters.
fn char_boundary_after(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MAX: usize = 16;

    fn texts<'a>(chunks: &[Chunk<'a>]) -> Vec<&'a str> {
        chunks.iter().map(|c| c.text).collect()
    }

    #[test]
    fn test_truncate_over_limit_keeps_prefix() {
        let message = "a".repeat(MAX + 1);
        let chunks = chunk_message(&message, MAX, OverflowAction::Truncate).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text.chars().count(), MAX);
    }

    #[test]
    fn test_truncate_at_limit_is_untouched() {
        let message = "a".repeat(MAX);
        let chunks = chunk_message(&message, MAX, OverflowAction::Truncate).unwrap();

        assert_eq!(texts(&chunks), vec![message.as_str()]);
    }

    #[test]
    fn test_split_over_limit_produces_remainder_chunk() {
        let message = "a".repeat(MAX + 1);
        let chunks = chunk_message(&message, MAX, OverflowAction::Split).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text.chars().count(), MAX);
        assert_eq!(chunks[1].text.chars().count(), 1);
        assert_eq!(chunks[0].position, 1);
        assert_eq!(chunks[1].position, 2);
    }

    #[test]
    fn test_split_at_limit_is_single_chunk() {
        let message = "a".repeat(MAX);
        let chunks = chunk_message(&message, MAX, OverflowAction::Split).unwrap();

        assert_eq!(texts(&chunks), vec![message.as_str()]);
    }

    #[test]
    fn test_split_exact_multiple_has_no_trailing_empty_chunk() {
        let message = "a".repeat(MAX * 3);
        let chunks = chunk_message(&message, MAX, OverflowAction::Split).unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.text.chars().count() == MAX));
    }

    #[test]
    fn test_split_reassembles_original_exactly() {
        let message = "the quick brown fox jumps over the lazy dog";
        let chunks = chunk_message(message, 7, OverflowAction::Split).unwrap();

        let rebuilt: String = chunks.iter().map(|c| c.text).collect();
        assert_eq!(rebuilt, message);
    }

    #[test]
    fn test_split_empty_message_yields_no_chunks() {
        let chunks = chunk_message("", MAX, OverflowAction::Split).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_split_is_idempotent_on_its_own_chunks() {
        let message = "a".repeat(MAX * 2 + 5);
        let chunks = chunk_message(&message, MAX, OverflowAction::Split).unwrap();

        for chunk in &chunks {
            let rechunked = chunk_message(chunk.text, MAX, OverflowAction::Split).unwrap();
            assert_eq!(texts(&rechunked), vec![chunk.text]);
        }
    }

    #[test]
    fn test_ignore_at_limit_writes_whole_message() {
        let message = "a".repeat(MAX);
        let chunks = chunk_message(&message, MAX, OverflowAction::Ignore).unwrap();

        assert_eq!(texts(&chunks), vec![message.as_str()]);
    }

    #[test]
    fn test_ignore_over_limit_drops_everything() {
        let message = "a".repeat(MAX + 1);
        let chunks = chunk_message(&message, MAX, OverflowAction::Ignore).unwrap();

        assert!(chunks.is_empty());
    }

    #[test]
    fn test_counting_is_per_character_not_per_byte() {
        // Four 3-byte characters; a byte-based split would land mid-character.
        let message = "日本語字";
        let chunks = chunk_message(message, 3, OverflowAction::Split).unwrap();

        assert_eq!(texts(&chunks), vec!["日本語", "字"]);
    }

    #[test]
    fn test_zero_max_size_is_a_configuration_error() {
        let err = chunk_message("anything", 0, OverflowAction::Truncate).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidMaxSize { size: 0 }));
    }

    #[test]
    fn test_overflow_action_parses_case_insensitively() {
        assert_eq!("Truncate".parse::<OverflowAction>().unwrap(), OverflowAction::Truncate);
        assert_eq!(" SPLIT ".parse::<OverflowAction>().unwrap(), OverflowAction::Split);
        assert_eq!("ignore".parse::<OverflowAction>().unwrap(), OverflowAction::Ignore);
        assert!("overflow".parse::<OverflowAction>().is_err());
    }
}
