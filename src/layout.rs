//! Typed layout adaptation: from a rendered dynamic value to the type a
//! caller asked for.
//!
//! The rendering engine itself (template parsing, placeholder substitution)
//! lives outside this crate behind the [`RenderValue`] trait. The adapter
//! here composes a renderer with the coercer and owns no state beyond its
//! configuration.

use crate::coerce::{ErrorPolicy, coerce};
use crate::entry_class::Level;
use crate::err::CoercionResult;
use crate::locale::Locale;
use crate::value::{LayoutValue, TypeDescriptor};

use hashbrown::HashMap;

/// A log event with its property set, as handed to layouts by the logging
/// pipeline.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: Level,
    pub logger: String,
    pub message: String,
    pub properties: HashMap<String, LayoutValue>,
}

impl LogEvent {
    pub fn new(level: Level, logger: impl Into<String>, message: impl Into<String>) -> Self {
        LogEvent {
            level,
            logger: logger.into(),
            message: message.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<LayoutValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&LayoutValue> {
        self.properties.get(name)
    }
}

/// Rendering collaborator: produces the raw, untyped value of a layout for
/// an event. Implemented by the surrounding template engine.
pub trait RenderValue {
    fn render_value(&self, event: &LogEvent) -> LayoutValue;
}

/// Renders a single event property looked up by name; an absent property
/// renders as null.
#[derive(Debug, Clone)]
pub struct PropertyRender {
    name: String,
}

impl PropertyRender {
    pub fn new(name: impl Into<String>) -> Self {
        PropertyRender { name: name.into() }
    }
}

impl RenderValue for PropertyRender {
    fn render_value(&self, event: &LogEvent) -> LayoutValue {
        event
            .property(&self.name)
            .cloned()
            .unwrap_or(LayoutValue::Null)
    }
}

/// A layout whose rendered value is coerced into a fixed requested type.
///
/// ```
/// use evsink::{
///     ErrorPolicy, LayoutValue, Level, LogEvent, PrimitiveKind, PropertyRender, TypeDescriptor,
///     TypedLayout,
/// };
///
/// let layout = TypedLayout::new(
///     PropertyRender::new("value1"),
///     TypeDescriptor::Primitive(PrimitiveKind::Integer),
/// );
/// let event = LogEvent::new(Level::Info, "logger1", "message1").with_property("value1", " 100 ");
///
/// let value = layout.render_typed(&event, ErrorPolicy::Throw).unwrap();
/// assert_eq!(value, LayoutValue::Int(100));
/// ```
#[derive(Debug, Clone)]
pub struct TypedLayout<R> {
    renderer: R,
    target: TypeDescriptor,
    locale: Locale,
}

impl<R: RenderValue> TypedLayout<R> {
    pub fn new(renderer: R, target: TypeDescriptor) -> Self {
        TypedLayout {
            renderer,
            target,
            locale: Locale::invariant(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn target(&self) -> &TypeDescriptor {
        &self.target
    }

    /// Renders the event and coerces the result into the configured target
    /// type. The error policy is snapshotted by the caller and passed per
    /// call.
    pub fn render_typed(
        &self,
        event: &LogEvent,
        policy: ErrorPolicy,
    ) -> CoercionResult<LayoutValue> {
        let raw = self.renderer.render_value(event);
        coerce(raw, &self.target, &self.locale, policy)
    }
}
