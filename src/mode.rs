/// Top-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Title screen, waiting for start.
    Intro,
    /// Running. Terminal: there is no way back to the intro.
    Playing,
}

impl GameState {
    pub fn label(self) -> &'static str {
        match self {
            GameState::Intro => "Intro",
            GameState::Playing => "Playing",
        }
    }

    /// State after a frame with the given start press.
    pub fn next(self, start_pressed: bool) -> Self {
        match self {
            GameState::Intro if start_pressed => GameState::Playing,
            other => other,
        }
    }
}
