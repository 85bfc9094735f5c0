//! # Bundles
//!
//! A bundle is a group of components written to one entity in a single
//! call: a lone component, `()`, or a (nested) tuple of bundles. Members are
//! written left to right, so a repeated type keeps its last value.

use super::component::Component;
use super::storage::Components;

/// A set of components that can be attached to an entity at once.
pub trait Bundle {
    /// Writes every member into `slot`, overwriting existing values.
    fn write_into(self, components: &mut Components, slot: u32);
}

impl<C: Component> Bundle for C {
    #[inline]
    fn write_into(self, components: &mut Components, slot: u32) {
        components.set(slot, self);
    }
}

impl Bundle for () {
    #[inline]
    fn write_into(self, _components: &mut Components, _slot: u32) {}
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($name: Bundle),+> Bundle for ($($name,)+) {
            #[inline]
            fn write_into(self, components: &mut Components, slot: u32) {
                let ($($name,)+) = self;
                $( $name.write_into(components, slot); )+
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
