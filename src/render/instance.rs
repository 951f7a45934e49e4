use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::config::{palette, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::ecs::components::{Building, Cat, Position, Size};
use crate::game::Game;
use crate::mode::GameState;

/// Per-instance data uploaded to GPU each frame.
/// Stride = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in world pixels.
    pub position: [f32; 2],
    /// Extent in world pixels.
    pub size: [f32; 2],
    /// RGBA color packed as u32. Multiplies the texture when textured.
    pub color: u32,
    /// 0 = flat color, n = skin texture layer n - 1.
    pub texture: u32,
}

impl SpriteInstance {
    pub fn solid(pos: Vec2, size: Vec2, color: u32) -> Self {
        Self {
            position: pos.into(),
            size: size.into(),
            color,
            texture: 0,
        }
    }

    pub fn textured(pos: Vec2, size: Vec2, layer: u32) -> Self {
        Self {
            position: pos.into(),
            size: size.into(),
            color: 0xFFFFFFFF,
            texture: layer + 1,
        }
    }
}

/// Cat pixel art, as (x, y, w, h, color) rects inside the 35x25 sprite.
const CAT_RECTS: [(f32, f32, f32, f32, u32); 4] = [
    (5.0, 10.0, 20.0, 12.0, palette::CAT_BODY),
    (20.0, 5.0, 10.0, 10.0, palette::CAT_BODY),
    (22.0, 6.0, 2.0, 2.0, palette::CAT_EYE),
    (27.0, 6.0, 2.0, 2.0, palette::CAT_EYE),
];

fn push_building(buf: &mut Vec<SpriteInstance>, pos: Vec2, size: Vec2, building: &Building) {
    buf.push(SpriteInstance::solid(pos, size, palette::BUILDING));
    for (offset, window) in building.windows() {
        buf.push(SpriteInstance::solid(pos + offset, window, palette::WINDOW));
    }
}

fn push_cat(buf: &mut Vec<SpriteInstance>, pos: Vec2) {
    for (x, y, w, h, color) in CAT_RECTS {
        buf.push(SpriteInstance::solid(pos + Vec2::new(x, y), Vec2::new(w, h), color));
    }
}

/// Build the frame's sprites back to front: sky, buildings, cats, hearts,
/// player. Text is drawn afterwards by the HUD.
pub fn build_instances(game: &Game, buf: &mut Vec<SpriteInstance>) {
    buf.clear();
    buf.push(SpriteInstance::solid(
        Vec2::ZERO,
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        palette::SKY_BLUE,
    ));

    // The title screen is sky only.
    if game.state() == GameState::Intro {
        return;
    }

    let world = game.world();
    for (_, (pos, size, building)) in world.query::<(&Position, &Size, &Building)>().iter() {
        push_building(buf, pos.0, size.0, building);
    }
    for (_, (pos, _)) in world.query::<(&Position, &Cat)>().iter() {
        push_cat(buf, pos.0);
    }

    game.hearts().build_instances(buf);

    if let Some(player) = game.player_box() {
        buf.push(SpriteInstance::textured(
            player.min,
            player.max - player.min,
            game.skin().layer(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameRules;
    use crate::hud::timer::SystemTimers;
    use crate::input::FrameInput;

    #[test]
    fn stride_matches_pipeline_layout() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 24);
    }

    #[test]
    fn intro_draws_only_sky() {
        let game = Game::new(GameRules::default(), fastrand::Rng::with_seed(9));
        let mut buf = Vec::new();
        build_instances(&game, &mut buf);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf[0].color, palette::SKY_BLUE);
    }

    #[test]
    fn playing_draws_back_to_front() {
        let mut game = Game::new(GameRules::default(), fastrand::Rng::with_seed(9));
        let mut timers = SystemTimers::new();
        let start = FrameInput {
            start: true,
            ..Default::default()
        };
        game.tick(&start, &mut timers);
        game.tick(&FrameInput::default(), &mut timers);

        let mut buf = Vec::new();
        build_instances(&game, &mut buf);

        assert_eq!(buf[0].color, palette::SKY_BLUE);
        assert_eq!(buf[1].color, palette::BUILDING);
        let last = buf.last().unwrap();
        assert_eq!(last.texture, game.skin().layer() + 1);

        let first_cat = buf.iter().position(|i| i.color == palette::CAT_BODY).unwrap();
        let last_window = buf.iter().rposition(|i| i.color == palette::WINDOW).unwrap();
        assert!(last_window < first_cat);
    }
}
