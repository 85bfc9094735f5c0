//! # Component System
//!
//! Components are plain data attached to entities. Each component type gets
//! its own storage, selected by the type itself: the generic parameter at
//! every call site is the type key.

/// Marker trait for ECS components.
///
/// Implemented explicitly per type:
///
/// ```rust
/// use sprig_core::Component;
///
/// #[derive(Clone, Debug)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {}
/// ```
pub trait Component: 'static {
    /// Human-readable type name, used in error messages.
    #[must_use]
    fn name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Optional release capability for components that own external resources.
///
/// The store never calls [`Dispose::dispose`] on its own: destroying an
/// entity or removing a component only drops the value. Callers that need
/// explicit release take the value out with [`crate::World::remove`] (or use
/// [`crate::World::remove_and_dispose`]) and dispose it themselves.
pub trait Dispose {
    /// Releases whatever the component holds.
    fn dispose(&mut self);
}

/// Strips the module path from a type name, keeping generic arguments intact.
fn short_type_name(full: &'static str) -> &'static str {
    let head = full
        .find(|c: char| matches!(c, '<' | '(' | '['))
        .unwrap_or(full.len());
    match full[..head].rfind("::") {
        Some(sep) => &full[sep + 2..],
        None => full,
    }
}
