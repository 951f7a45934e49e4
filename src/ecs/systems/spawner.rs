use glam::Vec2;

use crate::config::{GameRules, FLOOR_Y, SCREEN_WIDTH};
use crate::ecs::components::{
    Building, Cat, Position, Scrolling, Size, BUILDING_WIDTH, CAT_SIZE, WINDOW_COLUMNS,
};

/// Story counts a new building picks from.
const STORY_CHOICES: [u8; 2] = [4, 5];

/// Spawn a building with its left edge at `x`, plus one cat in a random
/// window. Returns (building, cat).
pub fn spawn_building(
    world: &mut hecs::World,
    x: f32,
    rng: &mut fastrand::Rng,
) -> (hecs::Entity, hecs::Entity) {
    let building = Building {
        stories: STORY_CHOICES[rng.usize(0..STORY_CHOICES.len())],
    };
    let height = building.height();
    let top_left = Vec2::new(x, FLOOR_Y - height);

    let column = rng.usize(0..WINDOW_COLUMNS.len());
    let row = rng.u8(0..building.stories);
    let cat_center = top_left + Building::window_center(column, row);

    let b = world.spawn((
        Position(top_left),
        Size(Vec2::new(BUILDING_WIDTH, height)),
        building,
        Scrolling,
    ));
    let c = world.spawn((
        Position(cat_center - CAT_SIZE * 0.5),
        Size(CAT_SIZE),
        Cat,
        Scrolling,
    ));
    (b, c)
}

/// Rightmost building edge, if any building is alive.
pub fn rightmost_edge(world: &hecs::World) -> Option<f32> {
    world
        .query::<(&Position, &Size, &Building)>()
        .iter()
        .map(|(_, (pos, size, _))| pos.0.x + size.0.x)
        .reduce(f32::max)
}

pub fn building_count(world: &hecs::World) -> usize {
    world.query::<&Building>().iter().count()
}

/// Keep at least `rules.min_buildings` alive by appending to the right.
/// Returns how many were spawned.
pub fn maintain(world: &mut hecs::World, rules: &GameRules, rng: &mut fastrand::Rng) -> usize {
    let mut spawned = 0;
    while building_count(world) < rules.min_buildings {
        let x = rightmost_edge(world).map_or(SCREEN_WIDTH, |right| right + rules.building_gap);
        spawn_building(world, x, rng);
        spawned += 1;
    }
    if spawned > 0 {
        log::debug!("Spawned {} building(s)", spawned);
    }
    spawned
}
