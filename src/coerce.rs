//! Coercion of dynamically-typed layout values into caller-requested types.
//!
//! A rendering step hands back a [`LayoutValue`] whose runtime shape depends
//! on what the log event carried; callers ask for a concrete type through a
//! [`TypeDescriptor`]. `coerce` bridges the two with one exhaustive match:
//! passthrough when the shapes already agree, numeric conversion between
//! primitive kinds, and locale-aware string parsing.
//!
//! The error policy is an explicit per-call parameter. Callers snapshot their
//! configuration once at the top of an operation and pass it down; the
//! coercer never reads ambient process state, so concurrent calls with
//! different policies or locales cannot interfere.

use crate::err::{CoercionError, CoercionResult};
use crate::locale::Locale;
use crate::value::{LayoutValue, PrimitiveKind, TypeDescriptor};

use log::warn;

/// What to do when a value cannot be interpreted as the requested type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the call with [`CoercionError::FormatError`].
    Throw,
    /// Substitute the target's default value and log a diagnostic.
    #[default]
    Suppress,
}

/// Coerces `raw` into the type described by `target`.
///
/// Rules are applied in priority order: null handling, passthrough, numeric
/// conversion, string parsing. Nullable targets unwrap to their inner kind
/// and never wrap a failure. Opaque passthrough preserves payload identity;
/// the returned `Arc` is the same allocation that came in.
///
/// Float-to-integer narrowing truncates toward zero; non-finite floats do
/// not narrow and count as a coercion failure.
pub fn coerce(
    raw: LayoutValue,
    target: &TypeDescriptor,
    locale: &Locale,
    policy: ErrorPolicy,
) -> CoercionResult<LayoutValue> {
    match try_coerce(raw, target, locale) {
        Ok(value) => Ok(value),
        Err(err) => match policy {
            ErrorPolicy::Throw => Err(err),
            ErrorPolicy::Suppress => {
                warn!("suppressed coercion failure: {err}");
                Ok(target.default_value())
            }
        },
    }
}

fn try_coerce(
    raw: LayoutValue,
    target: &TypeDescriptor,
    locale: &Locale,
) -> CoercionResult<LayoutValue> {
    if raw.is_null() {
        return if target.is_nullable() {
            Ok(LayoutValue::Null)
        } else {
            Err(CoercionError::format("null", target))
        };
    }

    let kind = match target {
        TypeDescriptor::Opaque => {
            return match raw {
                LayoutValue::Opaque(_) => Ok(raw),
                other => Err(CoercionError::format(other, target)),
            };
        }
        TypeDescriptor::Primitive(kind) | TypeDescriptor::Nullable(kind) => *kind,
    };

    coerce_primitive(raw, kind, locale).map_err(|raw| CoercionError::format(raw, target))
}

/// Coerces into an unwrapped primitive kind. On failure the raw value is
/// handed back so the caller can put it in the error message.
fn coerce_primitive(
    raw: LayoutValue,
    kind: PrimitiveKind,
    locale: &Locale,
) -> Result<LayoutValue, LayoutValue> {
    match (kind, raw) {
        // Passthrough: the runtime shape already matches, return unchanged.
        (PrimitiveKind::Integer, LayoutValue::Int(i)) => Ok(LayoutValue::Int(i)),
        (PrimitiveKind::Float, LayoutValue::Float(f)) => Ok(LayoutValue::Float(f)),
        (PrimitiveKind::Bool, LayoutValue::Bool(b)) => Ok(LayoutValue::Bool(b)),
        (PrimitiveKind::Text, LayoutValue::Str(s)) => Ok(LayoutValue::Str(s)),

        // Cross-primitive numeric conversion.
        (PrimitiveKind::Integer, LayoutValue::Float(f)) => {
            if f.is_finite() {
                Ok(LayoutValue::Int(f.trunc() as i64))
            } else {
                Err(LayoutValue::Float(f))
            }
        }
        (PrimitiveKind::Integer, LayoutValue::Bool(b)) => Ok(LayoutValue::Int(i64::from(b))),
        (PrimitiveKind::Float, LayoutValue::Int(i)) => Ok(LayoutValue::Float(i as f64)),
        (PrimitiveKind::Float, LayoutValue::Bool(b)) => {
            Ok(LayoutValue::Float(if b { 1.0 } else { 0.0 }))
        }
        (PrimitiveKind::Bool, LayoutValue::Int(i)) => Ok(LayoutValue::Bool(i != 0)),
        (PrimitiveKind::Bool, LayoutValue::Float(f)) => Ok(LayoutValue::Bool(f != 0.0)),

        // String parsing, trimmed, per the caller's locale.
        (PrimitiveKind::Integer, LayoutValue::Str(s)) => {
            let trimmed = s.trim();
            let normalized = locale.normalize_numeric(trimmed);
            match normalized.parse::<i64>() {
                Ok(i) => Ok(LayoutValue::Int(i)),
                Err(_) => Err(LayoutValue::Str(s)),
            }
        }
        (PrimitiveKind::Float, LayoutValue::Str(s)) => {
            let trimmed = s.trim();
            let normalized = locale.normalize_numeric(trimmed);
            match normalized.parse::<f64>() {
                Ok(f) => Ok(LayoutValue::Float(f)),
                Err(_) => Err(LayoutValue::Str(s)),
            }
        }
        (PrimitiveKind::Bool, LayoutValue::Str(s)) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(LayoutValue::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(LayoutValue::Bool(false))
            } else {
                Err(LayoutValue::Str(s))
            }
        }

        // Text targets format primitives; floats honor the locale separator.
        (PrimitiveKind::Text, LayoutValue::Int(i)) => Ok(LayoutValue::Str(i.to_string())),
        (PrimitiveKind::Text, LayoutValue::Bool(b)) => Ok(LayoutValue::Str(b.to_string())),
        (PrimitiveKind::Text, LayoutValue::Float(f)) => {
            Ok(LayoutValue::Str(locale.format_float(f)))
        }

        // Opaque payloads are never parsed into primitives.
        (_, raw @ LayoutValue::Opaque(_)) => Err(raw),
        // Null is handled before primitive dispatch.
        (_, LayoutValue::Null) => Err(LayoutValue::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const INT: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Integer);
    const NULLABLE_INT: TypeDescriptor = TypeDescriptor::Nullable(PrimitiveKind::Integer);
    const FLOAT: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Float);
    const BOOL: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Bool);
    const TEXT: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Text);

    fn coerce_throw(raw: impl Into<LayoutValue>, target: &TypeDescriptor) -> LayoutValue {
        coerce(
            raw.into(),
            target,
            &Locale::invariant(),
            ErrorPolicy::Throw,
        )
        .expect("coercion should succeed")
    }

    #[test]
    fn test_int_target_accepts_equivalent_representations() {
        for raw in [
            LayoutValue::Int(100),
            LayoutValue::Float(100.0),
            LayoutValue::from("100"),
            LayoutValue::from(" 100 "),
        ] {
            assert_eq!(coerce_throw(raw, &INT), LayoutValue::Int(100));
        }
    }

    #[test]
    fn test_nullable_int_unwraps_and_accepts_null() {
        assert_eq!(coerce_throw(LayoutValue::Int(100), &NULLABLE_INT), LayoutValue::Int(100));
        assert_eq!(coerce_throw(LayoutValue::from("100"), &NULLABLE_INT), LayoutValue::Int(100));
        assert_eq!(coerce_throw(LayoutValue::Null, &NULLABLE_INT), LayoutValue::Null);
    }

    #[test]
    fn test_null_into_non_nullable_primitive_fails() {
        let err = coerce(
            LayoutValue::Null,
            &INT,
            &Locale::invariant(),
            ErrorPolicy::Throw,
        )
        .unwrap_err();
        assert!(err.to_string().contains("integer"));
    }

    #[test]
    fn test_float_target_accepts_equivalent_representations() {
        for raw in [
            LayoutValue::Float(100.5),
            LayoutValue::from("100.5"),
            LayoutValue::from("  100.5  "),
        ] {
            assert_eq!(coerce_throw(raw, &FLOAT), LayoutValue::Float(100.5));
        }
    }

    #[test]
    fn test_decimal_parsing_respects_locale() {
        let comma = Locale::new(',', Some('.'));

        let parsed = coerce(
            LayoutValue::from("100,5"),
            &FLOAT,
            &comma,
            ErrorPolicy::Throw,
        )
        .unwrap();
        assert_eq!(parsed, LayoutValue::Float(100.5));

        // Under a comma-decimal locale, '.' groups: the same literal parses
        // to a different number instead of 100.5.
        let regrouped = coerce(
            LayoutValue::from("100.5"),
            &FLOAT,
            &comma,
            ErrorPolicy::Throw,
        )
        .unwrap();
        assert_eq!(regrouped, LayoutValue::Float(1005.0));
    }

    #[test]
    fn test_bool_target_accepts_equivalent_representations() {
        for raw in [
            LayoutValue::Bool(true),
            LayoutValue::from("true"),
            LayoutValue::from(" true "),
            LayoutValue::from("TRUE"),
        ] {
            assert_eq!(coerce_throw(raw, &BOOL), LayoutValue::Bool(true));
        }
        assert_eq!(coerce_throw(LayoutValue::from("false"), &BOOL), LayoutValue::Bool(false));
    }

    #[test]
    fn test_opaque_passthrough_preserves_identity() {
        let raw = LayoutValue::opaque(String::from("123"));
        let original = raw.as_opaque().unwrap().clone();

        let result = coerce(
            raw,
            &TypeDescriptor::Opaque,
            &Locale::invariant(),
            ErrorPolicy::Throw,
        )
        .unwrap();

        assert!(Arc::ptr_eq(result.as_opaque().unwrap(), &original));
    }

    #[test]
    fn test_malformed_string_throws_or_defaults_per_policy() {
        let err = coerce(
            LayoutValue::from("12312aa3"),
            &INT,
            &Locale::invariant(),
            ErrorPolicy::Throw,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "value `12312aa3` cannot be coerced into integer"
        );

        let suppressed = coerce(
            LayoutValue::from("12312aa3"),
            &INT,
            &Locale::invariant(),
            ErrorPolicy::Suppress,
        )
        .unwrap();
        assert_eq!(suppressed, LayoutValue::Int(0));
    }

    #[test]
    fn test_float_narrowing_truncates_toward_zero() {
        assert_eq!(coerce_throw(LayoutValue::Float(1.9), &INT), LayoutValue::Int(1));
        assert_eq!(coerce_throw(LayoutValue::Float(-1.9), &INT), LayoutValue::Int(-1));
    }

    #[test]
    fn test_non_finite_float_does_not_narrow() {
        let result = coerce(
            LayoutValue::Float(f64::NAN),
            &INT,
            &Locale::invariant(),
            ErrorPolicy::Suppress,
        )
        .unwrap();
        assert_eq!(result, LayoutValue::Int(0));
    }

    #[test]
    fn test_text_target_formats_primitives() {
        assert_eq!(coerce_throw(LayoutValue::Int(100), &TEXT), LayoutValue::from("100"));
        assert_eq!(coerce_throw(LayoutValue::Bool(true), &TEXT), LayoutValue::from("true"));

        let comma = Locale::new(',', Some('.'));
        let formatted = coerce(LayoutValue::Float(100.5), &TEXT, &comma, ErrorPolicy::Throw).unwrap();
        assert_eq!(formatted, LayoutValue::from("100,5"));
    }

    #[test]
    fn test_opaque_target_rejects_primitives() {
        let err = coerce(
            LayoutValue::Int(1),
            &TypeDescriptor::Opaque,
            &Locale::invariant(),
            ErrorPolicy::Throw,
        )
        .unwrap_err();
        assert!(err.to_string().contains("opaque"));

        // Suppressed, the opaque default is null.
        let suppressed = coerce(
            LayoutValue::Int(1),
            &TypeDescriptor::Opaque,
            &Locale::invariant(),
            ErrorPolicy::Suppress,
        )
        .unwrap();
        assert_eq!(suppressed, LayoutValue::Null);
    }

    #[test]
    fn test_grouped_integer_literal_parses() {
        assert_eq!(
            coerce_throw(LayoutValue::from("1,234,567"), &INT),
            LayoutValue::Int(1_234_567)
        );
    }
}
