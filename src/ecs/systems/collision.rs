use glam::Vec2;

use crate::config::GameRules;
use crate::ecs::components::{Aabb, Cat, Player, Position, Size};
use crate::particles::HeartParticles;

/// Pet every cat overlapping the player: despawn it, bump the score and
/// leave a heart where it sat. All overlaps resolve in one pass, in
/// query order. Returns the number of cats petted.
pub fn resolve(
    world: &mut hecs::World,
    player: hecs::Entity,
    hearts: &mut HeartParticles,
    rules: &GameRules,
) -> u32 {
    let player_box = match world.query_one_mut::<(&Position, &Size)>(player) {
        Ok((pos, size)) => Aabb::new(pos.0, size.0),
        Err(_) => return 0,
    };

    let petted: Vec<(hecs::Entity, Vec2)> = world
        .query_mut::<(&Position, &Size, &Cat)>()
        .into_iter()
        .filter_map(|(entity, (pos, size, _))| {
            let cat_box = Aabb::new(pos.0, size.0);
            player_box
                .overlaps(&cat_box)
                .then(|| (entity, cat_box.center()))
        })
        .collect();

    if petted.is_empty() {
        return 0;
    }

    for &(entity, center) in &petted {
        let _ = world.despawn(entity);
        hearts.spawn(center, rules);
    }

    let count = petted.len() as u32;
    if let Ok(state) = world.query_one_mut::<&mut Player>(player) {
        state.score += count;
        log::debug!("Petted {} cat(s), score now {}", count, state.score);
    }
    count
}
