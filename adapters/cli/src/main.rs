#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the maze explorer.

mod args;
mod logging;
mod map_file;
mod settings;

use anyhow::Result;
use clap::Parser;
use maze_explorer_rendering::{FrameInput, Presentation, RenderingBackend, Scene};
use maze_explorer_rendering_terminal::TerminalBackend;
use maze_explorer_system_generation::Generator;
use maze_explorer_world::{query, World};

use crate::{args::Args, settings::Settings};

const WINDOW_TITLE: &str = "Maze Explorer";

/// Entry point for the maze explorer command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let launch = settings::resolve(&args, settings);

    let (_log_guard, log_file) = logging::setup_logging()?;
    let seed = launch.seed.unwrap_or_else(rand::random);
    tracing::info!(
        log_file = %log_file.display(),
        seed,
        map_dir = %launch.map_dir.display(),
        "starting maze explorer"
    );

    let generator = Generator::new(launch.generation);
    let map = map_file::load_or_generate(&launch.map_dir, &generator, seed, launch.fresh);
    tracing::info!(path = %map.path.display(), origin = ?map.origin, "maze ready");

    let mut world = World::with_viewport(map.grid, launch.viewport);
    let scene = Scene::from_render_state(&query::render_state(&world), launch.viewport)?;
    let backend = TerminalBackend::new().with_poll_interval(launch.poll_interval);

    backend.run(
        Presentation::new(WINDOW_TITLE, scene),
        move |_frame_time, input, scene| play_frame(&mut world, input, scene),
    )?;

    tracing::info!("maze explorer exited");
    Ok(())
}

/// Applies at most one move and refreshes the scene when anything changed.
fn play_frame(world: &mut World, input: FrameInput, scene: &mut Scene) {
    let Some(direction) = input.direction else {
        return;
    };
    if !world.move_player(direction).moved() {
        return;
    }
    if let Err(error) = scene.update(&query::render_state(world)) {
        tracing::error!(%error, "failed to refresh the scene");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_explorer_core::{Cell, CellCoord, Direction, Grid, Phase, ViewportSize};
    use maze_explorer_rendering::Glyph;

    fn world() -> World {
        let row = vec![Cell::Wall, Cell::Spawn, Cell::Item, Cell::Exit, Cell::Wall];
        let grid = Grid::from_rows(vec![row]).expect("rectangular grid");
        World::with_viewport(grid, ViewportSize::new(5, 1))
    }

    fn scene_for(world: &World) -> Scene {
        Scene::from_render_state(&query::render_state(world), ViewportSize::new(5, 1))
            .expect("state fits window")
    }

    fn step(direction: Direction) -> FrameInput {
        FrameInput {
            direction: Some(direction),
            quit: false,
        }
    }

    #[test]
    fn frames_without_direction_change_nothing() {
        let mut world = world();
        let mut scene = scene_for(&world);
        let before = scene.clone();

        play_frame(&mut world, FrameInput::default(), &mut scene);
        play_frame(&mut world, step(Direction::Left), &mut scene);

        assert_eq!(scene, before);
    }

    #[test]
    fn frames_track_pickups_and_victory() {
        let mut world = world();
        let mut scene = scene_for(&world);

        play_frame(&mut world, step(Direction::Right), &mut scene);
        assert_eq!(scene.score, 1);
        assert_eq!(scene.player, Some(CellCoord::new(2, 0)));
        assert_eq!(scene.glyph(2, 0), Some(Glyph::Player));

        play_frame(&mut world, step(Direction::Right), &mut scene);
        assert_eq!(scene.phase, Phase::Won);
        assert!(scene.banner().is_some());

        play_frame(&mut world, step(Direction::Left), &mut scene);
        assert_eq!(scene.player, Some(CellCoord::new(3, 0)));
    }
}
