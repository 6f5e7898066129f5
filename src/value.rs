use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dynamically-typed layout value.
///
/// This is both the raw output of a rendering step and the result of a
/// coercion: the passthrough path of [`coerce`](crate::coerce::coerce)
/// returns its input unchanged, so a single enum covers both sides.
///
/// `Opaque` holds any non-primitive payload behind an `Arc`; cloning a value
/// preserves payload identity, which callers can observe with
/// [`Arc::ptr_eq`].
#[derive(Clone)]
pub enum LayoutValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Opaque(Arc<dyn Any + Send + Sync>),
}

// Manual impl: `dyn Any` payloads carry no `Debug` bound.
impl fmt::Debug for LayoutValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutValue::Null => f.write_str("Null"),
            LayoutValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            LayoutValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            LayoutValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            LayoutValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            LayoutValue::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl LayoutValue {
    pub fn opaque<T: Any + Send + Sync>(payload: T) -> Self {
        LayoutValue::Opaque(Arc::new(payload))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, LayoutValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LayoutValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LayoutValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LayoutValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LayoutValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        match self {
            LayoutValue::Opaque(payload) => Some(payload),
            _ => None,
        }
    }

    /// The primitive kind of this value, if it is a primitive.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            LayoutValue::Bool(_) => Some(PrimitiveKind::Bool),
            LayoutValue::Int(_) => Some(PrimitiveKind::Integer),
            LayoutValue::Float(_) => Some(PrimitiveKind::Float),
            LayoutValue::Str(_) => Some(PrimitiveKind::Text),
            LayoutValue::Null | LayoutValue::Opaque(_) => None,
        }
    }
}

/// Structural equality. Opaque payloads compare by `Arc` identity.
impl PartialEq for LayoutValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LayoutValue::Null, LayoutValue::Null) => true,
            (LayoutValue::Bool(a), LayoutValue::Bool(b)) => a == b,
            (LayoutValue::Int(a), LayoutValue::Int(b)) => a == b,
            (LayoutValue::Float(a), LayoutValue::Float(b)) => a == b,
            (LayoutValue::Str(a), LayoutValue::Str(b)) => a == b,
            (LayoutValue::Opaque(a), LayoutValue::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for LayoutValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutValue::Null => f.write_str("null"),
            LayoutValue::Bool(b) => write!(f, "{b}"),
            LayoutValue::Int(i) => write!(f, "{i}"),
            LayoutValue::Float(v) => write!(f, "{v}"),
            LayoutValue::Str(s) => f.write_str(s),
            LayoutValue::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

impl From<bool> for LayoutValue {
    fn from(b: bool) -> Self {
        LayoutValue::Bool(b)
    }
}

impl From<i64> for LayoutValue {
    fn from(i: i64) -> Self {
        LayoutValue::Int(i)
    }
}

impl From<i32> for LayoutValue {
    fn from(i: i32) -> Self {
        LayoutValue::Int(i64::from(i))
    }
}

impl From<f64> for LayoutValue {
    fn from(f: f64) -> Self {
        LayoutValue::Float(f)
    }
}

impl From<&str> for LayoutValue {
    fn from(s: &str) -> Self {
        LayoutValue::Str(s.to_string())
    }
}

impl From<String> for LayoutValue {
    fn from(s: String) -> Self {
        LayoutValue::Str(s)
    }
}

/// Interop with rendering engines that produce JSON-shaped dynamic values.
///
/// Integral JSON numbers map to `Int`, other numbers to `Float`; arrays and
/// objects are carried as opaque payloads.
impl From<serde_json::Value> for LayoutValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => LayoutValue::Null,
            serde_json::Value::Bool(b) => LayoutValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    LayoutValue::Int(i)
                } else {
                    LayoutValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => LayoutValue::Str(s),
            other => LayoutValue::opaque(other),
        }
    }
}

/// The closed set of primitive target kinds a caller may request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Describes the type a caller requests from a coercion call.
///
/// A closed tagged variant instead of runtime type inspection: the coercer
/// dispatches over this with one exhaustive match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Nullable(PrimitiveKind),
    /// Any non-primitive target; matched by payload identity, never parsed.
    Opaque,
}

impl TypeDescriptor {
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeDescriptor::Nullable(_) | TypeDescriptor::Opaque)
    }

    /// The requested primitive kind with any nullability wrapper stripped.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDescriptor::Primitive(kind) | TypeDescriptor::Nullable(kind) => Some(*kind),
            TypeDescriptor::Opaque => None,
        }
    }

    /// The value substituted for this target when a failure is suppressed:
    /// zero/false/empty for primitives, null for nullable and opaque targets.
    pub fn default_value(&self) -> LayoutValue {
        match self {
            TypeDescriptor::Primitive(PrimitiveKind::Integer) => LayoutValue::Int(0),
            TypeDescriptor::Primitive(PrimitiveKind::Float) => LayoutValue::Float(0.0),
            TypeDescriptor::Primitive(PrimitiveKind::Bool) => LayoutValue::Bool(false),
            TypeDescriptor::Primitive(PrimitiveKind::Text) => LayoutValue::Str(String::new()),
            TypeDescriptor::Nullable(_) | TypeDescriptor::Opaque => LayoutValue::Null,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => write!(f, "{kind}"),
            TypeDescriptor::Nullable(kind) => write!(f, "nullable {kind}"),
            TypeDescriptor::Opaque => f.write_str("opaque"),
        }
    }
}
