//! Parent/child links, tick order and world transform propagation

use super::{event_log, tick, OnUpdate};
use crate::foundation::collections::ActorId;
use crate::foundation::math::{constants::HALF_PI, Vec2};
use crate::scene::{Actor, Scene};
use approx::assert_relative_eq;

fn parent_and_child(scene: &mut Scene) -> (ActorId, ActorId) {
    let parent = scene.add_actor(Actor::new("P", Vec2::new(10.0, 0.0)));
    let child = scene.add_actor(Actor::new("C", Vec2::new(1.0, 0.0)));
    assert!(scene.add_child(parent, child));
    (parent, child)
}

#[test]
fn test_child_world_follows_parent() {
    let mut scene = Scene::new("hierarchy");
    let (parent, child) = parent_and_child(&mut scene);

    tick(&mut scene);
    let world = scene.actor(child).unwrap().world_position();
    assert_relative_eq!(world.x, 11.0, epsilon = 1e-5);
    assert_relative_eq!(world.y, 0.0, epsilon = 1e-5);

    scene.actor_mut(parent).unwrap().transform_mut().set_rotation(HALF_PI);
    tick(&mut scene);
    let world = scene.actor(child).unwrap().world_position();
    assert_relative_eq!(world.x, 10.0, epsilon = 1e-5);
    assert_relative_eq!(world.y, 1.0, epsilon = 1e-5);
}

#[test]
fn test_attach_refreshes_world_immediately() {
    let mut scene = Scene::new("hierarchy");
    let (_, child) = parent_and_child(&mut scene);

    let world = scene.actor(child).unwrap().world_position();
    assert_relative_eq!(world.x, 11.0, epsilon = 1e-5);
}

#[test]
fn test_parents_tick_before_children_regardless_of_insertion() {
    let log = event_log();
    let mut scene = Scene::new("order");

    let child = scene.add_actor(Actor::new("C", Vec2::new(1.0, 0.0)));
    let mover = OnUpdate::new(&log, |me, scene: &mut Scene| {
        if let Some(actor) = scene.actor_mut(me) {
            actor.transform_mut().translate(Vec2::new(1.0, 0.0));
        }
    });
    let parent = scene.add_actor(Actor::new("P", Vec2::new(10.0, 0.0)).with_behavior(mover));
    assert!(scene.add_child(parent, child));

    assert_eq!(scene.roots(), &[parent]);
    assert_eq!(scene.tick_order(), vec![parent, child]);

    tick(&mut scene);
    let world = scene.actor(child).unwrap().world_position();
    assert_relative_eq!(world.x, 12.0, epsilon = 1e-5);
}

#[test]
fn test_tick_order_is_preorder() {
    let mut scene = Scene::new("order");
    let a = scene.add_actor(Actor::new("a", Vec2::zeros()));
    let a1 = scene.add_actor(Actor::new("a1", Vec2::zeros()));
    let a2 = scene.add_actor(Actor::new("a2", Vec2::zeros()));
    let a1x = scene.add_actor(Actor::new("a1x", Vec2::zeros()));
    let b = scene.add_actor(Actor::new("b", Vec2::zeros()));

    assert!(scene.add_child(a, a1));
    assert!(scene.add_child(a, a2));
    assert!(scene.add_child(a1, a1x));

    assert_eq!(scene.tick_order(), vec![a, a1, a1x, a2, b]);
    assert_eq!(scene.find_by_name("a1x"), Some(a1x));
    assert_eq!(scene.find_by_name("nobody"), None);
}

#[test]
fn test_remove_actor_cascades_to_descendants() {
    let mut scene = Scene::new("cascade");
    let (parent, child) = parent_and_child(&mut scene);
    let grandchild = scene.add_actor(Actor::new("G", Vec2::new(0.0, 1.0)));
    let bystander = scene.add_actor(Actor::new("B", Vec2::zeros()));
    assert!(scene.add_child(child, grandchild));

    assert!(scene.remove_actor(parent));

    assert!(!scene.contains(parent));
    assert!(!scene.contains(child));
    assert!(!scene.contains(grandchild));
    assert!(scene.contains(bystander));
    assert_eq!(scene.roots(), &[bystander]);
    assert_eq!(scene.stats().removed, 3);
    assert!(!scene.remove_actor(parent));
}

#[test]
fn test_stale_handle_never_resolves_to_new_actor() {
    let mut scene = Scene::new("stale");
    let old = scene.add_actor(Actor::new("old", Vec2::zeros()));
    assert!(scene.remove_actor(old));

    let new = scene.add_actor(Actor::new("new", Vec2::zeros()));
    assert_ne!(old, new);
    assert!(scene.actor(old).is_none());
    assert_eq!(scene.actor(new).unwrap().name(), "new");
    assert_eq!(scene.actor(new).unwrap().id(), new);
}

#[test]
fn test_remove_child_by_name_detaches_first_match() {
    let mut scene = Scene::new("detach");
    let parent = scene.add_actor(Actor::new("P", Vec2::new(10.0, 0.0)));
    let first = scene.add_actor(Actor::new("orb", Vec2::new(1.0, 0.0)));
    let second = scene.add_actor(Actor::new("orb", Vec2::new(2.0, 0.0)));
    assert!(scene.add_child(parent, first));
    assert!(scene.add_child(parent, second));

    assert!(scene.remove_child(parent, "orb"));
    assert_eq!(scene.actor(parent).unwrap().children(), &[second]);
    assert_eq!(scene.actor(first).unwrap().parent(), None);
    assert_eq!(scene.roots(), &[parent, first]);

    let world = scene.actor(first).unwrap().world_position();
    assert_relative_eq!(world.x, 1.0, epsilon = 1e-5);

    assert!(!scene.remove_child(parent, "missing"));
    assert!(!scene.remove_child(first, "orb"));
}

#[test]
fn test_add_child_refusals() {
    let mut scene = Scene::new("refusals");
    let (parent, child) = parent_and_child(&mut scene);
    let gone = scene.add_actor(Actor::new("gone", Vec2::zeros()));
    assert!(scene.remove_actor(gone));

    assert!(!scene.add_child(parent, parent));
    assert!(!scene.add_child(child, parent));
    assert!(!scene.add_child(parent, child));
    assert!(!scene.add_child(parent, gone));
    assert!(!scene.add_child(gone, child));

    assert_eq!(scene.actor(parent).unwrap().children(), &[child]);
    assert_eq!(scene.actor(parent).unwrap().parent(), None);
}

#[test]
fn test_reparent_moves_child_between_parents() {
    let mut scene = Scene::new("reparent");
    let (first, child) = parent_and_child(&mut scene);
    let second = scene.add_actor(Actor::new("Q", Vec2::new(0.0, 5.0)));

    assert!(scene.add_child(second, child));
    assert!(scene.actor(first).unwrap().children().is_empty());
    assert_eq!(scene.actor(second).unwrap().children(), &[child]);
    assert_eq!(scene.actor(child).unwrap().parent(), Some(second));

    let world = scene.actor(child).unwrap().world_position();
    assert_relative_eq!(world.x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(world.y, 5.0, epsilon = 1e-5);
}

#[test]
fn test_look_at_uses_parent_world() {
    let mut scene = Scene::new("aim");
    let (_, child) = parent_and_child(&mut scene);

    assert!(scene.look_at(child, Vec2::new(11.0, 5.0)));
    let forward = scene.actor(child).unwrap().transform().forward();
    assert_relative_eq!(forward.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(forward.y, 1.0, epsilon = 1e-5);
}
