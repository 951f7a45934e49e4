use crate::config::{GameRules, FLOOR_Y};
use crate::ecs::components::{Player, Position, Size, Velocity};
use crate::input::FrameInput;

/// Bottom edge at or below the floor.
pub fn is_grounded(pos: &Position, size: &Size) -> bool {
    pos.0.y + size.0.y >= FLOOR_Y
}

/// Apply the jump impulse if grounded. Returns whether it applied.
pub fn jump(pos: &Position, size: &Size, vel: &mut Velocity, rules: &GameRules) -> bool {
    if !is_grounded(pos, size) {
        return false;
    }
    vel.0.y = rules.jump_velocity;
    true
}

/// Consume this frame's skin swap and jump presses.
pub fn apply_input(
    world: &mut hecs::World,
    player: hecs::Entity,
    input: &FrameInput,
    rules: &GameRules,
) {
    let Ok((pos, size, vel, state)) =
        world.query_one_mut::<(&Position, &Size, &mut Velocity, &mut Player)>(player)
    else {
        return;
    };

    if input.swap_skin {
        state.toggle_skin();
        log::debug!("Skin swapped to {:?}", state.skin);
    }
    if input.jump {
        jump(pos, size, vel, rules);
    }
}

/// Gravity, integrate, clamp to the floor.
pub fn integrate(world: &mut hecs::World, player: hecs::Entity, rules: &GameRules) {
    let Ok((pos, size, vel)) =
        world.query_one_mut::<(&mut Position, &Size, &mut Velocity)>(player)
    else {
        return;
    };

    vel.0.y += rules.gravity;
    pos.0.y += vel.0.y;

    if pos.0.y + size.0.y > FLOOR_Y {
        pos.0.y = FLOOR_Y - size.0.y;
        vel.0.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::PLAYER_SIZE;
    use glam::Vec2;

    fn spawn_player(world: &mut hecs::World, y: f32) -> hecs::Entity {
        world.spawn((
            Position(Vec2::new(68.0, y)),
            Size(PLAYER_SIZE),
            Velocity(Vec2::ZERO),
            Player::new(),
        ))
    }

    fn velocity(world: &hecs::World, e: hecs::Entity) -> f32 {
        world.get::<&Velocity>(e).map(|v| v.0.y).unwrap()
    }

    fn bottom(world: &hecs::World, e: hecs::Entity) -> f32 {
        world.get::<&Position>(e).map(|p| p.0.y).unwrap() + PLAYER_SIZE.y
    }

    #[test]
    fn falls_and_stays_on_floor() {
        let mut world = hecs::World::new();
        let rules = GameRules::default();
        let p = spawn_player(&mut world, 468.0);

        for _ in 0..200 {
            integrate(&mut world, p, &rules);
            assert!(bottom(&world, p) <= FLOOR_Y);
        }
        assert_eq!(bottom(&world, p), FLOOR_Y);
        assert_eq!(velocity(&world, p), 0.0);
    }

    #[test]
    fn grounded_jump_sets_impulse() {
        let mut world = hecs::World::new();
        let rules = GameRules::default();
        let p = spawn_player(&mut world, FLOOR_Y - PLAYER_SIZE.y);

        let input = FrameInput {
            jump: true,
            ..Default::default()
        };
        apply_input(&mut world, p, &input, &rules);
        assert_eq!(velocity(&world, p), rules.jump_velocity);

        integrate(&mut world, p, &rules);
        assert!(bottom(&world, p) < FLOOR_Y);
    }

    #[test]
    fn airborne_jump_is_ignored() {
        let mut world = hecs::World::new();
        let rules = GameRules::default();
        let p = spawn_player(&mut world, FLOOR_Y - PLAYER_SIZE.y);

        let jump_input = FrameInput {
            jump: true,
            ..Default::default()
        };
        apply_input(&mut world, p, &jump_input, &rules);
        integrate(&mut world, p, &rules);
        integrate(&mut world, p, &rules);

        let before = velocity(&world, p);
        apply_input(&mut world, p, &jump_input, &rules);
        assert_eq!(velocity(&world, p), before);
    }

    #[test]
    fn swap_press_toggles_skin() {
        let mut world = hecs::World::new();
        let rules = GameRules::default();
        let p = spawn_player(&mut world, 100.0);

        let input = FrameInput {
            swap_skin: true,
            ..Default::default()
        };
        apply_input(&mut world, p, &input, &rules);
        let skin = world.get::<&Player>(p).map(|s| s.skin).unwrap();
        assert_eq!(skin, crate::ecs::components::Skin::Brett);
    }
}
