//! # Query Signatures
//!
//! A query is a tuple of component types, e.g. `(Position, Velocity)`, or a
//! single component type. It knows how to resolve its storages once and
//! then probe them slot by slot.

use super::component::Component;
use super::storage::{ComponentStorage, Components};

/// A fixed, ordered signature of component types.
///
/// Implemented for single component types and for tuples of 1 to 8
/// component types.
pub trait Query: 'static {
    /// Resolved storages, one per requested type.
    type Fetch<'a>;
    /// Borrowed components for one matching slot.
    type Item<'a>;

    /// Names of the requested types, in order.
    fn type_names() -> Vec<&'static str>;

    /// Makes sure every requested storage exists.
    fn register(components: &mut Components);

    /// Resolves the storages.
    ///
    /// Returns `None` if any requested type has never been stored, in which
    /// case nothing can match.
    fn init_fetch(components: &Components) -> Option<Self::Fetch<'_>>;

    /// Probes every storage at `slot`. `None` on the first miss.
    fn fetch<'a>(fetch: &Self::Fetch<'a>, slot: u32) -> Option<Self::Item<'a>>;
}

/// A [`Query`] whose components can be cloned out of storage.
///
/// Owned items let a visitor hold the components while it mutates the world.
pub trait OwnedQuery: Query {
    /// Cloned components for one matching slot.
    type Owned;

    /// Probes every storage at `slot` and clones the hits.
    fn fetch_owned(fetch: &Self::Fetch<'_>, slot: u32) -> Option<Self::Owned>;
}

impl<C: Component> Query for C {
    type Fetch<'a> = &'a ComponentStorage<C>;
    type Item<'a> = &'a C;

    fn type_names() -> Vec<&'static str> {
        vec![C::name()]
    }

    fn register(components: &mut Components) {
        components.register::<C>();
    }

    fn init_fetch(components: &Components) -> Option<Self::Fetch<'_>> {
        components.storage::<C>()
    }

    #[inline]
    fn fetch<'a>(fetch: &Self::Fetch<'a>, slot: u32) -> Option<Self::Item<'a>> {
        (*fetch).get(slot)
    }
}

impl<C: Component + Clone> OwnedQuery for C {
    type Owned = C;

    #[inline]
    fn fetch_owned(fetch: &Self::Fetch<'_>, slot: u32) -> Option<Self::Owned> {
        (*fetch).get(slot).cloned()
    }
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($name: Component),+> Query for ($($name,)+) {
            type Fetch<'a> = ($(&'a ComponentStorage<$name>,)+);
            type Item<'a> = ($(&'a $name,)+);

            fn type_names() -> Vec<&'static str> {
                vec![$($name::name()),+]
            }

            fn register(components: &mut Components) {
                $( components.register::<$name>(); )+
            }

            fn init_fetch(components: &Components) -> Option<Self::Fetch<'_>> {
                Some(($( components.storage::<$name>()?, )+))
            }

            #[inline]
            fn fetch<'a>(fetch: &Self::Fetch<'a>, slot: u32) -> Option<Self::Item<'a>> {
                let ($($name,)+) = *fetch;
                Some(($( $name.get(slot)?, )+))
            }
        }

        #[allow(non_snake_case)]
        impl<$($name: Component + Clone),+> OwnedQuery for ($($name,)+) {
            type Owned = ($($name,)+);

            #[inline]
            fn fetch_owned(fetch: &Self::Fetch<'_>, slot: u32) -> Option<Self::Owned> {
                let ($($name,)+) = *fetch;
                Some(($( $name.get(slot)?.clone(), )+))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);
impl_query!(A, B, C, D, E, F, G);
impl_query!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Fizz;
    impl Component for Fizz {}

    #[derive(Clone, Debug, PartialEq)]
    struct Buzz(u32);
    impl Component for Buzz {}

    #[test]
    fn test_missing_storage_fetches_nothing() {
        let components = Components::new();
        assert!(<(Fizz, Buzz)>::init_fetch(&components).is_none());
    }

    #[test]
    fn test_fetch_requires_every_type() {
        let mut components = Components::new();
        components.set(0, Fizz);
        components.set(0, Buzz(0));
        components.set(1, Fizz);

        let fetch = <(Fizz, Buzz)>::init_fetch(&components).unwrap();
        assert_eq!(<(Fizz, Buzz)>::fetch(&fetch, 0), Some((&Fizz, &Buzz(0))));
        assert!(<(Fizz, Buzz)>::fetch(&fetch, 1).is_none());
        assert!(<(Fizz, Buzz)>::fetch(&fetch, 2).is_none());
    }

    #[test]
    fn test_owned_fetch_clones() {
        let mut components = Components::new();
        components.set(4, Buzz(9));
        let fetch = <Buzz>::init_fetch(&components).unwrap();
        assert_eq!(<Buzz>::fetch_owned(&fetch, 4), Some(Buzz(9)));
    }

    #[test]
    fn test_type_names_in_order() {
        assert_eq!(<(Buzz, Fizz)>::type_names(), vec!["Buzz", "Fizz"]);
    }
}
