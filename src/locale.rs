use std::borrow::Cow;

/// Numeric formatting convention supplied explicitly by the caller.
///
/// The coercer never consults thread or process locale state; callers pick a
/// `Locale` per call (or keep the invariant default) so concurrent coercions
/// cannot observe each other's settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Locale {
    pub decimal_separator: char,
    pub grouping_separator: Option<char>,
}

impl Locale {
    /// The documented default: `.` decimal separator, `,` grouping.
    pub const fn invariant() -> Self {
        Locale {
            decimal_separator: '.',
            grouping_separator: Some(','),
        }
    }

    pub const fn new(decimal_separator: char, grouping_separator: Option<char>) -> Self {
        Locale {
            decimal_separator,
            grouping_separator,
        }
    }

    /// Rewrites a numeric literal into the invariant form `f64::from_str`
    /// accepts: grouping separators stripped, the decimal separator mapped
    /// to `.`. Returns the input untouched when no rewrite is needed.
    pub(crate) fn normalize_numeric<'a>(&self, s: &'a str) -> Cow<'a, str> {
        let needs_rewrite = s.chars().any(|c| {
            Some(c) == self.grouping_separator
                || (c == self.decimal_separator && self.decimal_separator != '.')
        });

        if !needs_rewrite {
            return Cow::Borrowed(s);
        }

        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            if Some(c) == self.grouping_separator {
                continue;
            }
            if c == self.decimal_separator {
                out.push('.');
            } else {
                out.push(c);
            }
        }
        Cow::Owned(out)
    }

    /// Formats a float for a `Text` target using this locale's separator.
    pub(crate) fn format_float(&self, value: f64) -> String {
        let rendered = value.to_string();
        if self.decimal_separator == '.' {
            rendered
        } else {
            rendered.replace('.', &self.decimal_separator.to_string())
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::invariant()
    }
}
