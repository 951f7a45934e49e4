use glam::Vec2;

use crate::config::{palette, GameRules};
use crate::render::instance::SpriteInstance;

/// Heart sprite extent in pixels.
pub const HEART_SIZE: f32 = 20.0;
/// Starting opacity (out of 255).
const HEART_ALPHA: i32 = 255;

/// Pixel-art heart, as (x, y, w, h) rects inside the 20x20 sprite.
const HEART_RECTS: [[f32; 4]; 5] = [
    [4.0, 0.0, 4.0, 4.0],
    [12.0, 0.0, 4.0, 4.0],
    [0.0, 4.0, 20.0, 8.0],
    [4.0, 12.0, 12.0, 4.0],
    [8.0, 16.0, 4.0, 4.0],
];

/// A heart floating up from a petted cat.
#[derive(Debug, Clone, Copy)]
pub struct Heart {
    /// Top-left corner.
    pub pos: Vec2,
    pub vel_y: f32,
    /// Remaining opacity. The heart dies once this reaches 0 or below.
    pub alpha: i32,
}

impl Heart {
    #[cfg(test)]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(HEART_SIZE * 0.5)
    }
}

/// Owns every live heart.
pub struct HeartParticles {
    hearts: Vec<Heart>,
}

impl HeartParticles {
    pub fn new() -> Self {
        Self {
            hearts: Vec::with_capacity(32),
        }
    }

    /// Spawn a heart centred on `center`.
    pub fn spawn(&mut self, center: Vec2, rules: &GameRules) {
        self.hearts.push(Heart {
            pos: center - Vec2::splat(HEART_SIZE * 0.5),
            vel_y: rules.heart_rise,
            alpha: HEART_ALPHA,
        });
    }

    /// Rise, scroll with the world, fade, remove the faded ones.
    pub fn update(&mut self, scroll_speed: f32, rules: &GameRules) {
        for h in &mut self.hearts {
            h.pos.y += h.vel_y;
            h.pos.x -= scroll_speed;
            h.alpha -= rules.heart_fade;
        }
        self.hearts.retain(|h| h.alpha > 0);
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Heart> {
        self.hearts.iter()
    }

    /// Append heart sprites to the render buffer.
    pub fn build_instances(&self, buf: &mut Vec<SpriteInstance>) {
        for h in &self.hearts {
            let alpha = h.alpha.clamp(0, 255) as u32;
            let color = (palette::HEART & 0xFFFFFF00) | alpha;
            for [x, y, w, hgt] in HEART_RECTS {
                buf.push(SpriteInstance::solid(
                    h.pos + Vec2::new(x, y),
                    Vec2::new(w, hgt),
                    color,
                ));
            }
        }
    }

    /// Number of active hearts.
    pub fn count(&self) -> usize {
        self.hearts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fades_until_removed() {
        let rules = GameRules::default();
        let mut hearts = HeartParticles::new();
        hearts.spawn(Vec2::new(100.0, 300.0), &rules);

        let mut last_alpha = i32::MAX;
        let mut frames = 0;
        while hearts.count() > 0 {
            hearts.update(0.0, &rules);
            frames += 1;
            if let Some(h) = hearts.iter().next() {
                assert!(h.alpha <= last_alpha);
                assert!(h.alpha > 0);
                last_alpha = h.alpha;
            }
            assert!(frames < 1000);
        }
        // 255 / 5: gone on the frame alpha first hits 0.
        assert_eq!(frames, 51);
    }

    #[test]
    fn rises_and_scrolls() {
        let rules = GameRules::default();
        let mut hearts = HeartParticles::new();
        hearts.spawn(Vec2::new(100.0, 300.0), &rules);
        assert_eq!(hearts.iter().next().unwrap().center(), Vec2::new(100.0, 300.0));

        for _ in 0..3 {
            hearts.update(5.0, &rules);
        }
        let h = hearts.iter().next().unwrap();
        assert_eq!(h.center(), Vec2::new(85.0, 294.0));
        assert_eq!(h.alpha, 240);
    }

    #[test]
    fn instances_carry_opacity() {
        let rules = GameRules::default();
        let mut hearts = HeartParticles::new();
        hearts.spawn(Vec2::new(50.0, 50.0), &rules);
        hearts.update(0.0, &rules);

        let mut buf = Vec::new();
        hearts.build_instances(&mut buf);
        assert_eq!(buf.len(), HEART_RECTS.len());
        assert!(buf.iter().all(|i| i.color & 0xFF == 250));
    }
}
