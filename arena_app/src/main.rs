//! Arena demo application
//!
//! Runs a title card, then a small chase game: the player moves and shoots,
//! enemies hunt the player once it wanders into their view cone. The run is
//! headless, driven by a scripted input, and the last frame is printed as a
//! character grid.

mod actors;
mod config;
mod console;

use actors::{enemy, player, ui_text, TitleCard};
use config::ArenaConfig;
use console::ConsoleGrid;
use rand::{rngs::StdRng, Rng, SeedableRng};
use scene_engine::foundation::math::constants::PI;
use scene_engine::prelude::*;

const DEFAULT_CONFIG_PATH: &str = "arena.toml";
const TITLE_TICKS: u32 = 10;

fn build_arena(config: &ArenaConfig) -> Scene {
    let mut scene = Scene::new("arena");
    let player_id = scene.add_actor(player(config));

    // Spawn inside the visible grid so the printed frame shows everyone
    let width = config.grid_columns as f32 * config.cell_size;
    let height = config.grid_rows as f32 * config.cell_size;
    let mut rng = StdRng::seed_from_u64(config.seed);
    for _ in 0..config.enemy.count {
        let position = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let heading = rng.gen_range(-PI..PI);
        scene.add_actor(enemy(position, player_id, &config.enemy).with_rotation(heading));
    }

    scene.add_actor(ui_text("Hud", Vec2::zeros(), "WASD to move, SPACE to fire"));
    log::info!("Arena built with {} actors", scene.len());
    scene
}

fn build_title(next_scene: usize) -> Scene {
    let mut scene = Scene::new("title");
    scene.add_actor(
        ui_text("Title", Vec2::new(300.0, 100.0), "ARENA").with_behavior(TitleCard::new(TITLE_TICKS, next_scene)),
    );
    scene
}

/// Held actions per tick: wander, turn, shoot, then stand still
fn demo_script() -> Vec<InputActions> {
    let mut script = vec![InputActions::empty(); TITLE_TICKS as usize];
    script.extend(std::iter::repeat(InputActions::MOVE_RIGHT).take(12));
    script.push(InputActions::FIRE);
    script.extend(std::iter::repeat(InputActions::MOVE_UP).take(8));
    script.push(InputActions::MOVE_UP | InputActions::FIRE);
    script.extend(std::iter::repeat(InputActions::MOVE_LEFT).take(20));
    script.push(InputActions::FIRE);
    script
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = ArenaConfig::load_or_default(&path)?;
    config.validate()?;

    Engine::init_logging(&config.engine)?;
    let mut engine = Engine::new(config.engine.clone())?;
    log::info!("Starting arena demo (config: {}, seed: {})", path, config.seed);

    let arena = engine.add_scene(build_arena(&config));
    let title = engine.add_scene(build_title(arena));
    engine.set_current_scene(title)?;

    let mut input = ScriptedInput::new(demo_script());
    let mut grid = ConsoleGrid::new(config.grid_columns, config.grid_rows, config.cell_size);
    engine.run(&mut input, &mut grid)?;

    println!("{}", grid.render());
    if let Some(scene) = engine.scene(arena) {
        let stats = scene.stats();
        log::info!(
            "Arena finished: {} ticks, {} collisions, {} spawned, {} removed, {} actors left",
            stats.ticks,
            stats.collisions,
            stats.spawned,
            stats.removed,
            scene.len()
        );
    }
    if grid.dropped() > 0 {
        log::debug!("{} draws fell outside the grid on the last frame", grid.dropped());
    }

    Ok(())
}
