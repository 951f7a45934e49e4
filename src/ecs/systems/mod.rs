pub mod collision;
pub mod movement;
pub mod player;
pub mod spawner;

use crate::config::GameRules;
use crate::hud::timer::{SystemPhase, SystemTimers};
use crate::input::FrameInput;
use crate::particles::HeartParticles;

/// Run all simulation systems for one PLAYING frame.
/// Returns the number of cats petted this frame.
pub fn tick(
    world: &mut hecs::World,
    player: hecs::Entity,
    hearts: &mut HeartParticles,
    input: &FrameInput,
    rules: &GameRules,
    rng: &mut fastrand::Rng,
    timers: &mut SystemTimers,
) -> u32 {
    // 1. Skin swap + jump
    timers.begin();
    player::apply_input(world, player, input, rules);
    let scroll_speed = if input.scroll_held {
        rules.scroll_speed
    } else {
        0.0
    };
    timers.end(SystemPhase::Input);

    // 2. Gravity + floor clamp
    timers.begin();
    player::integrate(world, player, rules);
    timers.end(SystemPhase::Physics);

    // 3. Scenery + hearts move with the world
    timers.begin();
    movement::scroll(world, scroll_speed);
    hearts.update(scroll_speed, rules);
    timers.end(SystemPhase::Scroll);

    // 4. Player vs cats
    timers.begin();
    let petted = collision::resolve(world, player, hearts, rules);
    timers.end(SystemPhase::Collision);

    // 5. Keep the skyline full
    timers.begin();
    spawner::maintain(world, rules, rng);
    timers.end(SystemPhase::Spawn);

    petted
}
