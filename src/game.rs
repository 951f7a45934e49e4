use glam::Vec2;

use crate::config::GameRules;
use crate::ecs::components::{Aabb, Cat, Player, Position, Size, Skin, Velocity, PLAYER_SIZE};
use crate::ecs::systems;
use crate::ecs::systems::spawner;
use crate::hud::timer::SystemTimers;
use crate::input::FrameInput;
use crate::mode::GameState;
use crate::particles::HeartParticles;

/// Where the player is centred at startup.
const PLAYER_START: Vec2 = Vec2::new(100.0, 500.0);
/// Left edges of the buildings that exist before the first frame.
const INITIAL_BUILDINGS: [f32; 3] = [400.0, 700.0, 1000.0];

/// All simulation state. Knows nothing about windows or the GPU.
pub struct Game {
    world: hecs::World,
    hearts: HeartParticles,
    player: hecs::Entity,
    state: GameState,
    rules: GameRules,
    rng: fastrand::Rng,
    tick_count: u64,
}

impl Game {
    pub fn new(rules: GameRules, mut rng: fastrand::Rng) -> Self {
        let mut world = hecs::World::new();

        let player = world.spawn((
            Position(PLAYER_START - PLAYER_SIZE * 0.5),
            Size(PLAYER_SIZE),
            Velocity(Vec2::ZERO),
            Player::new(),
        ));

        for x in INITIAL_BUILDINGS {
            spawner::spawn_building(&mut world, x, &mut rng);
        }

        Self {
            world,
            hearts: HeartParticles::new(),
            player,
            state: GameState::Intro,
            rules,
            rng,
            tick_count: 0,
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self, input: &FrameInput, timers: &mut SystemTimers) {
        self.tick_count += 1;

        match self.state {
            GameState::Intro => {
                let next = self.state.next(input.start);
                if next != self.state {
                    log::info!("{} -> {}", self.state.label(), next.label());
                    self.state = next;
                }
            }
            GameState::Playing => {
                let petted = systems::tick(
                    &mut self.world,
                    self.player,
                    &mut self.hearts,
                    input,
                    &self.rules,
                    &mut self.rng,
                    timers,
                );
                if petted > 0 {
                    log::info!("Cats petted: {}", self.score());
                }
            }
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn hearts(&self) -> &HeartParticles {
        &self.hearts
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[cfg(test)]
    pub fn player(&self) -> hecs::Entity {
        self.player
    }

    pub fn score(&self) -> u32 {
        self.world
            .get::<&Player>(self.player)
            .map(|p| p.score)
            .unwrap_or(0)
    }

    pub fn skin(&self) -> Skin {
        self.world
            .get::<&Player>(self.player)
            .map(|p| p.skin)
            .unwrap_or(Skin::Cheryl)
    }

    pub fn player_box(&self) -> Option<Aabb> {
        let pos = self.world.get::<&Position>(self.player).ok()?;
        let size = self.world.get::<&Size>(self.player).ok()?;
        Some(Aabb::new(pos.0, size.0))
    }

    pub fn building_count(&self) -> usize {
        spawner::building_count(&self.world)
    }

    pub fn cat_count(&self) -> usize {
        self.world.query::<&Cat>().iter().count()
    }

    pub fn heart_count(&self) -> usize {
        self.hearts.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FLOOR_Y;
    use crate::ecs::components::{Building, Scrolling, CAT_SIZE};

    fn new_game() -> Game {
        Game::new(GameRules::default(), fastrand::Rng::with_seed(42))
    }

    fn start(game: &mut Game, timers: &mut SystemTimers) {
        let input = FrameInput {
            start: true,
            jump: true,
            ..Default::default()
        };
        game.tick(&input, timers);
        assert_eq!(game.state(), GameState::Playing);
    }

    fn scenery_positions(game: &Game) -> Vec<(hecs::Entity, Vec2)> {
        let mut v: Vec<_> = game
            .world()
            .query::<(&Position, &Scrolling)>()
            .iter()
            .map(|(e, (p, _))| (e, p.0))
            .collect();
        v.sort_by_key(|(e, _)| e.id());
        v
    }

    #[test]
    fn intro_waits_for_start() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        assert_eq!(game.state(), GameState::Intro);
        assert_eq!(game.building_count(), 3);
        assert_eq!(game.cat_count(), 3);

        let before = game.player_box();
        for _ in 0..10 {
            game.tick(&FrameInput::default(), &mut timers);
        }
        assert_eq!(game.state(), GameState::Intro);
        // World is frozen on the title screen.
        assert_eq!(game.player_box(), before);
        assert_eq!(game.building_count(), 3);
    }

    #[test]
    fn start_press_does_not_jump() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        start(&mut game, &mut timers);

        let vy = game.world().get::<&Velocity>(game.player()).unwrap().0.y;
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn first_playing_frame_restores_building_threshold() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        start(&mut game, &mut timers);
        game.tick(&FrameInput::default(), &mut timers);
        assert_eq!(game.building_count(), 4);
        assert_eq!(game.cat_count(), 4);
    }

    #[test]
    fn player_never_below_floor() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        start(&mut game, &mut timers);

        for i in 0..600 {
            let input = FrameInput {
                scroll_held: true,
                jump: i % 7 == 0,
                ..Default::default()
            };
            game.tick(&input, &mut timers);
            let b = game.player_box().unwrap();
            assert!(b.max.y <= FLOOR_Y);
            assert!(game.building_count() >= 4);
        }
    }

    #[test]
    fn scroll_moves_scenery_by_exact_amount() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        start(&mut game, &mut timers);
        // Settle the spawner so no new entities appear mid-measurement.
        game.tick(&FrameInput::default(), &mut timers);

        let before = scenery_positions(&game);
        let frames = 20;
        let held = FrameInput {
            scroll_held: true,
            ..Default::default()
        };
        for _ in 0..frames {
            game.tick(&held, &mut timers);
        }
        let after = scenery_positions(&game);

        let speed = GameRules::default().scroll_speed;
        for (entity, pos) in &after {
            if let Some((_, old)) = before.iter().find(|(e, _)| e == entity) {
                assert_eq!(old.x - pos.x, frames as f32 * speed);
                assert_eq!(old.y, pos.y);
            }
        }
    }

    #[test]
    fn petting_a_cat_scores_once() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        start(&mut game, &mut timers);
        game.tick(&FrameInput::default(), &mut timers);
        assert_eq!(game.score(), 0);

        // Drop a cat right where the player will be next frame.
        let center = game.player_box().unwrap().center();
        let cat = game.world.spawn((
            Position(center - CAT_SIZE * 0.5),
            Size(CAT_SIZE),
            Cat,
            Scrolling,
        ));
        let cats_before = game.cat_count();

        game.tick(&FrameInput::default(), &mut timers);
        assert_eq!(game.score(), 1);
        assert_eq!(game.heart_count(), 1);
        assert!(!game.world().contains(cat));
        assert_eq!(game.cat_count(), cats_before - 1);

        for _ in 0..5 {
            game.tick(&FrameInput::default(), &mut timers);
        }
        assert_eq!(game.score(), 1);
        assert!(!game.world().contains(cat));
    }

    #[test]
    fn skin_swaps_only_while_playing() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        let swap = FrameInput {
            swap_skin: true,
            ..Default::default()
        };
        game.tick(&swap, &mut timers);
        assert_eq!(game.skin(), Skin::Cheryl);

        start(&mut game, &mut timers);
        game.tick(&swap, &mut timers);
        assert_eq!(game.skin(), Skin::Brett);
    }

    #[test]
    fn buildings_and_cats_spawn_in_pairs() {
        let mut game = new_game();
        let mut timers = SystemTimers::new();
        start(&mut game, &mut timers);
        game.tick(&FrameInput::default(), &mut timers);

        let buildings = game.world().query::<&Building>().iter().count();
        assert_eq!(buildings, game.cat_count());
    }
}
