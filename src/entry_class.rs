use std::fmt;
use std::str::FromStr;

use log::trace;

/// Log event severity, ordered from least to most severe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}

/// The closed set of classifications a platform event log records entries
/// under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntryClass {
    Informational,
    Warning,
    Error,
    SuccessAudit,
    FailureAudit,
}

impl EntryClass {
    /// The classification derived from event severity alone.
    pub fn from_level(level: Level) -> Self {
        match level {
            Level::Trace | Level::Debug | Level::Info => EntryClass::Informational,
            Level::Warn => EntryClass::Warning,
            Level::Error | Level::Fatal => EntryClass::Error,
        }
    }
}

impl fmt::Display for EntryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryClass::Informational => "Information",
            EntryClass::Warning => "Warning",
            EntryClass::Error => "Error",
            EntryClass::SuccessAudit => "SuccessAudit",
            EntryClass::FailureAudit => "FailureAudit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown entry classification `{value}`")]
pub struct UnknownEntryClass {
    value: String,
}

impl FromStr for EntryClass {
    type Err = UnknownEntryClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("information")
            || trimmed.eq_ignore_ascii_case("informational")
        {
            Ok(EntryClass::Informational)
        } else if trimmed.eq_ignore_ascii_case("warning") {
            Ok(EntryClass::Warning)
        } else if trimmed.eq_ignore_ascii_case("error") {
            Ok(EntryClass::Error)
        } else if trimmed.eq_ignore_ascii_case("successaudit") {
            Ok(EntryClass::SuccessAudit)
        } else if trimmed.eq_ignore_ascii_case("failureaudit") {
            Ok(EntryClass::FailureAudit)
        } else {
            Err(UnknownEntryClass {
                value: trimmed.to_string(),
            })
        }
    }
}

/// Resolves the classification for an entry: an explicit override wins when
/// it names a known classification; otherwise the severity-derived default
/// applies. An unparseable override falls back instead of failing.
pub fn resolve_entry_class(level: Level, override_text: Option<&str>) -> EntryClass {
    match override_text {
        Some(text) => match text.parse::<EntryClass>() {
            Ok(class) => class,
            Err(_) => {
                trace!("entry class override `{text}` not recognized, deriving from {level}");
                EntryClass::from_level(level)
            }
        },
        None => EntryClass::from_level(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_derived_classes() {
        assert_eq!(EntryClass::from_level(Level::Trace), EntryClass::Informational);
        assert_eq!(EntryClass::from_level(Level::Debug), EntryClass::Informational);
        assert_eq!(EntryClass::from_level(Level::Info), EntryClass::Informational);
        assert_eq!(EntryClass::from_level(Level::Warn), EntryClass::Warning);
        assert_eq!(EntryClass::from_level(Level::Error), EntryClass::Error);
        assert_eq!(EntryClass::from_level(Level::Fatal), EntryClass::Error);
    }

    #[test]
    fn test_override_parses_case_insensitively() {
        assert_eq!(
            resolve_entry_class(Level::Warn, Some("SuccessAudit")),
            EntryClass::SuccessAudit
        );
        assert_eq!(
            resolve_entry_class(Level::Warn, Some("SUCCESSAUDIT")),
            EntryClass::SuccessAudit
        );
        assert_eq!(
            resolve_entry_class(Level::Debug, Some("error")),
            EntryClass::Error
        );
    }

    #[test]
    fn test_unparseable_override_falls_back_to_severity() {
        assert_eq!(
            resolve_entry_class(Level::Warn, Some("fallback to auto determined")),
            EntryClass::Warning
        );
        assert_eq!(resolve_entry_class(Level::Info, None), EntryClass::Informational);
    }
}
