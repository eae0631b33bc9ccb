//! Arena actors: player, chasing enemies, bullets and UI text

use crate::config::{ArenaConfig, BulletConfig, EnemyConfig, WorldBounds};
use scene_engine::foundation::math::{utils, Vec2};
use scene_engine::prelude::*;

pub const PLAYER: &str = "Player";
pub const ENEMY: &str = "Enemy";
pub const BULLET: &str = "Bullet";
pub const DEATH_MESSAGE: &str = "You died.";

/// Held movement keys as a unit direction (screen space, +Y down)
pub fn movement_direction(input: &dyn InputSource) -> Vec2 {
    let mut direction = Vec2::zeros();
    if input.is_down(InputActions::MOVE_LEFT) {
        direction.x -= 1.0;
    }
    if input.is_down(InputActions::MOVE_RIGHT) {
        direction.x += 1.0;
    }
    if input.is_down(InputActions::MOVE_UP) {
        direction.y -= 1.0;
    }
    if input.is_down(InputActions::MOVE_DOWN) {
        direction.y += 1.0;
    }
    utils::normalize_or_zero(direction)
}

/// Keyboard-driven actor that shoots along its facing
pub struct Player {
    speed: f32,
    bullet: BulletConfig,
    bounds: WorldBounds,
}

impl Player {
    pub fn new(speed: f32, bullet: BulletConfig, bounds: WorldBounds) -> Self {
        Self { speed, bullet, bounds }
    }

    fn fire(&self, me: ActorId, scene: &mut Scene) {
        let Some(actor) = scene.actor(me) else {
            return;
        };
        let origin = actor.world_position();
        let heading = actor.transform().forward();

        let id = scene.add_actor(bullet(origin, heading, &self.bullet, self.bounds));
        log::debug!("Player fired {:?} towards ({:.2}, {:.2})", id, heading.x, heading.y);
    }
}

impl Behavior for Player {
    fn update(&mut self, me: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        if ctx.input().was_pressed(InputActions::QUIT) {
            ctx.request_close();
            return;
        }

        let direction = movement_direction(ctx.input());
        if direction != Vec2::zeros() {
            let Some(position) = scene.actor(me).map(Actor::world_position) else {
                return;
            };
            scene.look_at(me, position + direction);
            if let Some(actor) = scene.actor_mut(me) {
                actor.transform_mut().translate(direction * self.speed * ctx.dt());
            }
        }

        if ctx.input().was_pressed(InputActions::FIRE) {
            self.fire(me, scene);
        }
    }
}

/// Chases its target while the target is in its view cone
pub struct Enemy {
    target: ActorId,
    speed: f32,
    sight_distance: f32,
    max_view_angle: f32,
}

impl Enemy {
    pub fn new(target: ActorId, config: &EnemyConfig) -> Self {
        Self {
            target,
            speed: config.speed,
            sight_distance: config.sight_distance,
            max_view_angle: config.view_angle(),
        }
    }

    /// Within sight distance and strictly inside the view cone
    pub fn target_in_sight(&self, me: &Actor, target: &Actor) -> bool {
        let offset = target.world_position() - me.world_position();
        if offset.norm() > self.sight_distance {
            return false;
        }

        let direction = utils::normalize_or_zero(offset);
        if direction == Vec2::zeros() {
            return true;
        }
        let cosine = utils::clamp_unit(direction.dot(&me.transform().forward()));
        cosine.acos() < self.max_view_angle
    }
}

impl Behavior for Enemy {
    fn update(&mut self, me: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        let (Some(actor), Some(target)) = (scene.actor(me), scene.actor(self.target)) else {
            return;
        };
        if !self.target_in_sight(actor, target) {
            return;
        }

        let goal = target.world_position();
        let step = utils::normalize_or_zero(goal - actor.world_position()) * self.speed * ctx.dt();
        scene.look_at(me, goal);
        if let Some(actor) = scene.actor_mut(me) {
            actor.transform_mut().translate(step);
        }
    }

    fn on_collision(&mut self, _me: ActorId, other: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        if other != self.target {
            return;
        }
        let Some(position) = scene.actor(other).map(Actor::world_position) else {
            return;
        };

        if scene.remove_actor(other) {
            log::info!("Player caught at ({:.1}, {:.1})", position.x, position.y);
            scene.add_actor(ui_text("Death Message", position, DEATH_MESSAGE));
            ctx.request_close();
        }
    }
}

/// Flies in a straight line; destroys the first enemy it touches
pub struct Bullet {
    velocity: Vec2,
    speed: f32,
    bounds: WorldBounds,
}

impl Bullet {
    pub fn new(direction: Vec2, speed: f32, bounds: WorldBounds) -> Self {
        Self {
            velocity: utils::normalize_or_zero(direction),
            speed,
            bounds,
        }
    }
}

impl Behavior for Bullet {
    fn update(&mut self, me: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        let Some(actor) = scene.actor_mut(me) else {
            return;
        };
        actor.transform_mut().translate(self.velocity * self.speed * ctx.dt());

        let position = actor.transform().local_position();
        if !self.bounds.contains(position) {
            log::trace!("Bullet {:?} left the arena", me);
            scene.remove_actor(me);
        }
    }

    fn on_collision(&mut self, me: ActorId, other: ActorId, scene: &mut Scene, _ctx: &mut TickContext<'_>) {
        let hit_enemy = scene.actor(other).is_some_and(|actor| actor.name() == ENEMY);
        if hit_enemy {
            scene.remove_actor(other);
            scene.remove_actor(me);
        }
    }
}

/// Holds a scene for a number of ticks, then asks the driver to switch
pub struct TitleCard {
    ticks_left: u32,
    next_scene: usize,
}

impl TitleCard {
    pub fn new(ticks: u32, next_scene: usize) -> Self {
        Self { ticks_left: ticks, next_scene }
    }
}

impl Behavior for TitleCard {
    fn update(&mut self, _me: ActorId, _scene: &mut Scene, ctx: &mut TickContext<'_>) {
        if self.ticks_left == 0 {
            return;
        }
        self.ticks_left -= 1;
        if self.ticks_left == 0 || ctx.input().was_pressed(InputActions::FIRE) {
            self.ticks_left = 0;
            ctx.request_scene(self.next_scene);
        }
    }
}

pub fn player(config: &ArenaConfig) -> Actor {
    Actor::new(PLAYER, config.player.start)
        .with_collider(Collider::circle(config.player.radius))
        .with_appearance(Appearance::Glyph { symbol: '@', color: Color::GREEN })
        .with_behavior(Player::new(config.player.speed, config.bullet.clone(), config.bounds))
}

pub fn enemy(position: Vec2, target: ActorId, config: &EnemyConfig) -> Actor {
    Actor::new(ENEMY, position)
        .with_collider(Collider::circle(config.radius))
        .with_appearance(Appearance::Glyph { symbol: 'E', color: Color::RED })
        .with_behavior(Enemy::new(target, config))
}

pub fn bullet(position: Vec2, direction: Vec2, config: &BulletConfig, bounds: WorldBounds) -> Actor {
    Actor::new(BULLET, position)
        .with_collider(Collider::circle(config.radius))
        .with_appearance(Appearance::Glyph { symbol: '*', color: Color::YELLOW })
        .with_behavior(Bullet::new(direction, config.speed, bounds))
}

/// Text label: appearance only, no collider or behavior
pub fn ui_text(name: &str, position: Vec2, text: &str) -> Actor {
    Actor::new(name, position).with_appearance(Appearance::Text {
        text: text.to_string(),
        font_size: 12.0,
        color: Color::WHITE,
    })
}
