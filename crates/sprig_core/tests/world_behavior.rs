//! # World Behavior Tests
//!
//! End-to-end checks of entity lifecycle, id recycling and view semantics.
//!
//! Run with: cargo test -p sprig_core --test world_behavior

use std::rc::Rc;

use sprig_core::{Component, EcsError, EntityId, Visit, World, WorldConfig};

#[derive(Clone, Debug, Default, PartialEq)]
struct A {
    value: i32,
}
impl Component for A {}

#[derive(Clone, Debug, Default, PartialEq)]
struct B {
    value: i32,
}
impl Component for B {}

#[derive(Clone, Debug, Default, PartialEq)]
struct C;
impl Component for C {}

#[derive(Clone, Debug, PartialEq)]
struct Fizz;
impl Component for Fizz {}

#[derive(Clone, Debug, PartialEq)]
struct Buzz;
impl Component for Buzz {}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn creates_empty_entity() {
    let mut world = World::new();
    world.create(());
    assert_eq!(world.len(), 1);
}

#[test]
fn creates_entity_with_components() {
    let mut world = World::new();
    let entity = world.create((A::default(), B::default()));
    assert!(world.has::<A>(entity) && world.has::<B>(entity));
    assert!(!world.has::<C>(entity));
}

#[test]
fn exists_tracks_create_and_destroy() {
    let mut world = World::new();
    let entities: Vec<_> = (0..50).map(|_| world.create(())).collect();
    for &entity in &entities {
        assert!(world.exists(entity));
        assert!(world.destroy(entity));
        assert!(!world.exists(entity));
    }
}

#[test]
fn destroying_dead_or_unknown_ids_changes_nothing() {
    let mut world = World::new();
    let entity = world.create(A { value: 3 });
    let other = world.create(());
    world.destroy(other);

    assert!(!world.destroy(other));
    assert!(!world.destroy(EntityId::new(500, 0)));
    assert!(!world.destroy(EntityId::NULL));
    assert_eq!(world.len(), 1);
    assert_eq!(world.get::<A>(entity), Some(&A { value: 3 }));
}

#[test]
fn size_is_created_minus_destroyed() {
    let mut world = World::new();
    let entities: Vec<_> = (0..40).map(|_| world.create(())).collect();
    for entity in entities.iter().step_by(3) {
        world.destroy(*entity);
    }
    assert_eq!(world.len(), 40 - 14);
}

#[test]
fn clears_the_world() {
    let mut world = World::new();
    for _ in 0..100 {
        world.create(A::default());
    }
    assert_eq!(world.len(), 100);
    world.clear();
    assert_eq!(world.len(), 0);
    assert!(world.is_empty());
    assert!(world.resource::<A>().is_none());
}

#[test]
fn live_slots_cover_every_entity() {
    let mut world = World::new();
    for _ in 0..100 {
        world.create(());
    }
    assert_eq!(world.live_slots().len(), world.len());
}

// ============================================================================
// RECYCLING
// ============================================================================

#[test]
fn stale_id_does_not_alias_new_occupant() {
    let mut world = World::with_config(WorldConfig {
        recycle_threshold: 0,
        recycle_divisor: 1,
        initial_capacity: 0,
    });
    let old = world.create(A { value: 1 });
    world.destroy(old);

    let new = world.create(A { value: 2 });
    assert_eq!(new.index(), old.index());
    assert_ne!(new.generation(), old.generation());
    assert!(!world.exists(old));
    assert!(world.exists(new));
    assert!(world.get::<A>(old).is_none());
    assert!(!world.destroy(old));
    assert!(world.exists(new));
}

#[test]
fn recycles_after_quarter_of_slots_are_freed() {
    let mut world = World::new();
    for _ in 0..1024 {
        world.create(());
    }
    for i in 0..512 {
        world.destroy(EntityId::new(i, 0));
    }

    assert_eq!(world.create(()), EntityId::new(0, 1));
    assert_eq!(world.create(()), EntityId::new(1, 1));
}

#[test]
fn churn_does_not_leak_components() {
    let mut world = World::new();
    for _ in 0..2048 {
        let entity = world.create(());
        world.set(entity, A::default()).unwrap();
        world.destroy(entity);
    }

    let entity = world.create(());
    assert!(!world.has::<A>(entity));
    world.set(entity, A::default()).unwrap();
    assert_eq!(world.storage::<A>().map(|s| s.len()), Some(1));
}

// ============================================================================
// INSERT
// ============================================================================

#[test]
fn insert_then_create_never_collide() {
    let mut world = World::new();

    let explicit = world.insert(EntityId::new(100, 0), ());
    assert_eq!(explicit.index(), 100);
    let next = world.create(());
    assert_eq!(next.index(), 101);

    let low = world.insert(EntityId::new(5, 0), A::default());
    assert_eq!(low.index(), 5);
    assert_ne!(world.create(()).index(), 5);
    assert_eq!(world.len(), 4);
}

#[test]
fn insert_far_past_recycle_threshold_then_create_advances() {
    let mut world = World::new();

    let explicit = world.insert(EntityId::new(2048, 0), A { value: 1 });
    assert_eq!(explicit, EntityId::new(2048, 0));

    let next = world.create(());
    assert_eq!(next, EntityId::new(2049, 0));
    assert!(world.exists(explicit) && world.exists(next));
    assert_eq!(world.len(), 2);
    assert_eq!(world.allocator().reclaimed(), 0);

    // Skipped slots stay claimable with their original identity.
    let gap = world.insert(EntityId::new(3, 0), ());
    assert_eq!(gap, EntityId::new(3, 0));
    assert_eq!(world.len(), 3);
}

#[test]
fn insert_on_taken_slot_behaves_like_create() {
    let mut world = World::new();
    let first = world.create(A { value: 1 });
    world.destroy(first);
    world.create(());

    // Slot 0 is free again, so the explicit identity is honoured.
    let back = world.insert(first, B { value: 2 });
    assert_eq!(back, first);
    assert!(!world.has::<A>(back));

    // Slot 0 is taken now: a stale id falls back to a fresh slot.
    let stale = EntityId::new(first.index(), first.generation().wrapping_add(1));
    let fallback = world.insert(stale, ());
    assert_ne!(fallback.index(), first.index());
}

#[test]
fn insert_merges_components() {
    let mut world = World::new();
    let entity = world.create((A::default(), B::default()));
    assert_eq!(world.get::<A>(entity), Some(&A::default()));

    world.insert(entity, A { value: 5 });
    assert_eq!(world.get::<A>(entity), Some(&A { value: 5 }));
    assert_eq!(world.get::<B>(entity), Some(&B::default()));
}

// ============================================================================
// COMPONENT ACCESS
// ============================================================================

#[test]
fn remove_then_get_is_absent() {
    let mut world = World::new();
    let entity = world.create(());
    world.set(entity, A { value: 10 }).unwrap();
    if let Some(a) = world.get_mut::<A>(entity) {
        a.value = 50;
    }

    assert_eq!(world.remove::<A>(entity), Some(A { value: 50 }));
    assert!(world.get::<A>(entity).is_none());
    assert!(!world.has::<A>(entity));
    assert!(world.remove::<A>(entity).is_none());
    assert!(world.remove::<A>(entity).is_none());
}

#[test]
fn reads_on_dead_entities_are_absent() {
    let mut world = World::new();
    assert!(world.remove::<A>(EntityId::new(0, 0)).is_none());
    assert!(world.get::<A>(EntityId::new(100, 0)).is_none());
    assert!(!world.has::<A>(EntityId::new(100, 0)));
    assert!(world.get::<A>(EntityId::NULL).is_none());
}

#[test]
fn set_on_dead_entity_names_type_and_id() {
    let mut world = World::new();
    assert!(!world.exists(EntityId::new(0, 0)));

    let err = world.set(EntityId::new(0, 0), A::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot set component \"A\" for dead entity 0"
    );
    assert!(matches!(err, EcsError::DeadEntity { component: "A", .. }));
    assert!(world.storage::<A>().is_none());
    assert!(world.is_empty());
}

#[test]
fn resource_is_shared_singleton() {
    let mut world = World::new();
    world.create(A { value: 0 });

    if let Some(res) = world.resource_mut::<A>() {
        res.value = 1;
    }
    assert_eq!(world.resource::<A>().map(|a| a.value), Some(1));
}

// ============================================================================
// VIEWS
// ============================================================================

#[test]
fn view_over_unknown_type_is_empty() {
    let mut world = World::new();
    for _ in 0..100 {
        world.create(());
    }

    let mut visited = 0;
    world.each::<C, _, _>(|_, _, _| visited += 1);
    assert_eq!(visited, 0);
}

#[test]
fn returns_a_non_empty_view() {
    let mut world = World::new();
    let mut expected = 0;
    for i in 0..100 {
        let entity = world.create((A::default(), B::default()));
        if i % 3 == 0 {
            world.set(entity, C).unwrap();
            expected += 1;
        }
    }

    let mut actual = 0;
    world.each::<(A, C), _, _>(|_, _, _| actual += 1);
    assert_eq!(actual, expected);
}

#[test]
fn fizz_buzz_view_visits_in_slot_order() {
    let mut world = World::new();
    for i in 0..30 {
        let entity = world.create(());
        if i % 3 == 0 {
            world.set(entity, Fizz).unwrap();
        }
        if i % 5 == 0 {
            world.set(entity, Buzz).unwrap();
        }
    }

    let mut result = Vec::new();
    world.each::<(Fizz, Buzz), _, _>(|_, entity, _| result.push(entity.index()));
    assert_eq!(result, vec![0, 15]);

    let mut reversed = Vec::new();
    world
        .view::<(Buzz, Fizz)>()
        .each_ref(&world, |entity, _| reversed.push(entity.index()));
    assert_eq!(reversed, vec![0, 15]);
}

#[test]
fn view_instances_are_cached() {
    let mut world = World::new();
    let first = world.view::<(A, B)>();
    let second = world.view::<(A, B)>();
    assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn stop_halts_iteration_and_keeps_effects() {
    let mut world = World::new();
    for i in 0..100 {
        world.create(A { value: i });
    }

    let mut count = 0;
    world.each::<A, _, _>(|world, entity, a| {
        if a.value == 50 {
            return Visit::Stop;
        }
        count += 1;
        world.set(entity, B { value: a.value }).unwrap();
        Visit::Continue
    });

    assert_eq!(count, 50);
    let view = world.view::<B>();
    assert_eq!(view.count(&world), 50);
}

#[test]
fn entities_created_mid_iteration_are_not_visited() {
    let mut world = World::new();
    world.create(A::default());

    let mut count = 0;
    world.each::<A, _, _>(|world, _, _| {
        count += 1;
        world.create(A::default());
    });
    assert_eq!(count, 1);
    assert_eq!(world.len(), 2);

    world.each::<A, _, _>(|world, _, _| {
        count += 1;
        world.create(A::default());
    });
    assert_eq!(count, 3);
    assert_eq!(world.len(), 4);
}

#[test]
fn entities_destroyed_mid_iteration_are_skipped() {
    let mut world = World::new();
    let entities: Vec<_> = (0..10).map(|i| world.create(A { value: i })).collect();

    let mut visited = Vec::new();
    world.each::<A, _, _>(|world, entity, a| {
        visited.push(a.value);
        // Each visit destroys the next entity in slot order.
        if let Some(next) = world.entity_at(entity.index() + 1) {
            world.destroy(next);
        }
    });

    assert_eq!(visited, vec![0, 2, 4, 6, 8]);
    assert_eq!(world.len(), 5);
    assert!(!world.exists(entities[1]));
}

#[test]
fn components_removed_mid_iteration_are_skipped() {
    let mut world = World::new();
    let entities: Vec<_> = (0..6).map(|_| world.create((A::default(), B::default()))).collect();

    let mut visited = 0;
    world.each::<(A, B), _, _>(|world, _, _| {
        visited += 1;
        for entity in &entities[3..] {
            world.remove::<B>(*entity);
        }
    });
    assert_eq!(visited, 1 + 2);
}
