use glam::Vec2;

/// Top-left corner in world pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Bounding box extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size(pub Vec2);

/// Velocity in pixels/frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

/// Marks world scenery that moves left with the scroll speed and is
/// despawned once fully past the left edge.
#[derive(Debug, Clone, Copy)]
pub struct Scrolling;

/// One of the two interchangeable player appearances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skin {
    Cheryl,
    Brett,
}

impl Skin {
    pub fn toggled(self) -> Self {
        match self {
            Skin::Cheryl => Skin::Brett,
            Skin::Brett => Skin::Cheryl,
        }
    }

    /// Texture array layer holding this skin's image.
    pub fn layer(self) -> u32 {
        match self {
            Skin::Cheryl => 0,
            Skin::Brett => 1,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Skin::Cheryl => "cheryl.png",
            Skin::Brett => "brett.png",
        }
    }
}

/// The player-controlled character.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub skin: Skin,
    pub score: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            skin: Skin::Cheryl,
            score: 0,
        }
    }

    pub fn toggle_skin(&mut self) {
        self.skin = self.skin.toggled();
    }
}

/// Building width in pixels.
pub const BUILDING_WIDTH: f32 = 180.0;
/// Height of one story in pixels.
pub const STORY_HEIGHT: f32 = 100.0;
/// Vertical pitch between window rows.
pub const WINDOW_ROW_PITCH: f32 = 90.0;
/// Top margin of the first window row.
pub const WINDOW_TOP_MARGIN: f32 = 20.0;
/// Left edge of each window column, relative to the building.
pub const WINDOW_COLUMNS: [f32; 2] = [30.0, 110.0];
pub const WINDOW_SIZE: Vec2 = Vec2::new(40.0, 50.0);

#[derive(Debug, Clone, Copy)]
pub struct Building {
    /// 4 or 5.
    pub stories: u8,
}

impl Building {
    pub fn height(&self) -> f32 {
        self.stories as f32 * STORY_HEIGHT
    }

    /// Window rectangles as (offset from building top-left, size).
    pub fn windows(&self) -> impl Iterator<Item = (Vec2, Vec2)> {
        (0..self.stories).flat_map(|s| {
            let y = WINDOW_TOP_MARGIN + s as f32 * WINDOW_ROW_PITCH;
            WINDOW_COLUMNS
                .into_iter()
                .map(move |x| (Vec2::new(x, y), WINDOW_SIZE))
        })
    }

    /// Center of the window at `column` / `row`, relative to the building.
    pub fn window_center(column: usize, row: u8) -> Vec2 {
        Vec2::new(
            WINDOW_COLUMNS[column] + WINDOW_SIZE.x * 0.5,
            WINDOW_TOP_MARGIN + row as f32 * WINDOW_ROW_PITCH + WINDOW_SIZE.y * 0.5,
        )
    }
}

/// A cat sitting in a window, waiting to be petted.
#[derive(Debug, Clone, Copy)]
pub struct Cat;

pub const CAT_SIZE: Vec2 = Vec2::new(35.0, 25.0);
pub const PLAYER_SIZE: Vec2 = Vec2::new(64.0, 64.0);

/// Axis-aligned box used for overlap tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));

        let c = Aabb::new(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn skin_toggle_alternates() {
        let mut p = Player::new();
        assert_eq!(p.skin, Skin::Cheryl);
        p.toggle_skin();
        assert_eq!(p.skin, Skin::Brett);
        p.toggle_skin();
        assert_eq!(p.skin, Skin::Cheryl);
    }

    #[test]
    fn window_layout_per_story() {
        let b = Building { stories: 5 };
        let windows: Vec<_> = b.windows().collect();
        assert_eq!(windows.len(), 10);
        assert_eq!(windows[0].0, Vec2::new(30.0, 20.0));
        assert_eq!(windows[9].0, Vec2::new(110.0, 380.0));
        assert_eq!(b.height(), 500.0);

        assert_eq!(Building::window_center(0, 0), Vec2::new(50.0, 45.0));
        assert_eq!(Building::window_center(1, 3), Vec2::new(130.0, 315.0));
    }
}
