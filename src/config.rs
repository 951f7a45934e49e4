use std::path::PathBuf;

/// World width in pixels. The window is created at this logical size.
pub const SCREEN_WIDTH: f32 = 800.0;
/// World height in pixels.
pub const SCREEN_HEIGHT: f32 = 600.0;
/// Ground line. Buildings stand on it and the player lands on it.
pub const FLOOR_Y: f32 = SCREEN_HEIGHT;

/// Window title, also shown on the intro screen.
pub const TITLE: &str = "Cheryl and Brett's Cat Adventure";

/// Simulation tick rate (seconds per tick).
pub const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
pub const MAX_ACCUMULATOR: f64 = 0.25;

/// Overrides the directory the skin PNGs are read from.
pub const ASSET_DIR_ENV: &str = "CAT_ADVENTURE_ASSETS";

/// Packed RGBA colors (0xRRGGBBAA).
pub mod palette {
    pub const SKY_BLUE: u32 = 0x87CEEBFF;
    pub const BUILDING: u32 = 0x50505AFF;
    pub const WINDOW: u32 = 0xFFFFC8FF;
    pub const CAT_BODY: u32 = 0xFF8C00FF;
    pub const CAT_EYE: u32 = 0x000000FF;
    pub const HEART: u32 = 0xFF3232FF;
    /// Placeholder fill for the first skin when its image is missing.
    pub const PLACEHOLDER_CHERYL: [u8; 4] = [255, 0, 255, 255];
    /// Placeholder fill for the second skin when its image is missing.
    pub const PLACEHOLDER_BRETT: [u8; 4] = [0, 255, 0, 255];
}

/// Per-frame tunables. Units are pixels and pixels/frame.
#[derive(Debug, Clone, Copy)]
pub struct GameRules {
    /// Added to the player's vertical velocity every frame.
    pub gravity: f32,
    /// Vertical velocity set by a grounded jump (negative = up).
    pub jump_velocity: f32,
    /// World scroll while the move key is held.
    pub scroll_speed: f32,
    /// Spawner keeps at least this many buildings alive.
    pub min_buildings: usize,
    /// Horizontal gap between the rightmost building and a new one.
    pub building_gap: f32,
    /// Heart vertical velocity (negative = up).
    pub heart_rise: f32,
    /// Opacity lost by a heart each frame (out of 255).
    pub heart_fade: i32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            jump_velocity: -35.0,
            scroll_speed: 5.0,
            min_buildings: 4,
            building_gap: 120.0,
            heart_rise: -2.0,
            heart_fade: 5,
        }
    }
}

/// Directory holding `cheryl.png` / `brett.png`.
pub fn asset_dir() -> PathBuf {
    std::env::var_os(ASSET_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
