use crate::ecs::components::{Position, Scrolling, Size};

/// Shift all scenery left by `scroll_speed`, then despawn anything whose
/// right edge went past the left screen edge. Returns the despawn count.
pub fn scroll(world: &mut hecs::World, scroll_speed: f32) -> usize {
    let mut gone: Vec<hecs::Entity> = Vec::new();

    for (entity, (pos, size, _)) in world.query_mut::<(&mut Position, &Size, &Scrolling)>() {
        pos.0.x -= scroll_speed;
        if pos.0.x + size.0.x < 0.0 {
            gone.push(entity);
        }
    }

    for &entity in &gone {
        let _ = world.despawn(entity);
    }
    gone.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn shifts_by_speed_and_culls_offscreen() {
        let mut world = hecs::World::new();
        let near = world.spawn((Position(Vec2::new(-20.0, 0.0)), Size(Vec2::splat(20.0)), Scrolling));
        let far = world.spawn((Position(Vec2::new(300.0, 0.0)), Size(Vec2::splat(20.0)), Scrolling));
        // Not scenery: untouched.
        let fixed = world.spawn((Position(Vec2::new(300.0, 0.0)), Size(Vec2::splat(20.0))));

        // Right edge at exactly 0 is still alive.
        assert_eq!(scroll(&mut world, 0.0), 0);
        assert!(world.contains(near));

        assert_eq!(scroll(&mut world, 5.0), 1);
        assert!(!world.contains(near));
        assert_eq!(world.get::<&Position>(far).unwrap().0.x, 295.0);
        assert_eq!(world.get::<&Position>(fixed).unwrap().0.x, 300.0);
    }
}
