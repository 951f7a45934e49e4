use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Input consumed by one simulation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Move key held: the world scrolls this frame.
    pub scroll_held: bool,
    /// Jump pressed since the last frame.
    pub jump: bool,
    /// Skin swap pressed since the last frame.
    pub swap_skin: bool,
    /// Start pressed since the last frame (intro screen).
    pub start: bool,
}

/// Tracks keyboard state between simulation ticks. Presses are latched
/// until a tick takes them, so a press landing between ticks is not lost.
pub struct KeyboardState {
    right_down: bool,
    space_pressed: bool,
    swap_pressed: bool,
    debug_toggle_pressed: bool,
    quit_pressed: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            right_down: false,
            space_pressed: false,
            swap_pressed: false,
            debug_toggle_pressed: false,
            quit_pressed: false,
        }
    }

    /// Feed one keyboard event. Auto-repeat presses are ignored.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        let pressed = state == ElementState::Pressed;
        if key == KeyCode::ArrowRight {
            self.right_down = pressed;
            return;
        }
        if !pressed || repeat {
            return;
        }
        match key {
            KeyCode::Space => self.space_pressed = true,
            KeyCode::KeyC => self.swap_pressed = true,
            KeyCode::F12 => self.debug_toggle_pressed = true,
            KeyCode::Escape => self.quit_pressed = true,
            _ => {}
        }
    }

    /// Window lost focus: we won't see the release.
    pub fn release_all(&mut self) {
        self.right_down = false;
    }

    /// Take latched presses for one frame. Held keys persist.
    pub fn take_frame(&mut self) -> FrameInput {
        let space = std::mem::take(&mut self.space_pressed);
        FrameInput {
            scroll_held: self.right_down,
            jump: space,
            swap_skin: std::mem::take(&mut self.swap_pressed),
            start: space,
        }
    }

    pub fn take_debug_toggle(&mut self) -> bool {
        std::mem::take(&mut self.debug_toggle_pressed)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_latch_until_taken() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::Space, ElementState::Pressed, false);
        keys.handle_key(KeyCode::Space, ElementState::Released, false);

        let frame = keys.take_frame();
        assert!(frame.jump);
        assert!(frame.start);
        assert_eq!(keys.take_frame(), FrameInput::default());
    }

    #[test]
    fn held_scroll_persists_across_frames() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::ArrowRight, ElementState::Pressed, false);
        assert!(keys.take_frame().scroll_held);
        assert!(keys.take_frame().scroll_held);

        keys.handle_key(KeyCode::ArrowRight, ElementState::Released, false);
        assert!(!keys.take_frame().scroll_held);
    }

    #[test]
    fn repeats_are_ignored() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::KeyC, ElementState::Pressed, true);
        assert!(!keys.take_frame().swap_skin);

        keys.handle_key(KeyCode::KeyC, ElementState::Pressed, false);
        assert!(keys.take_frame().swap_skin);
    }

    #[test]
    fn debug_toggle_and_quit() {
        let mut keys = KeyboardState::new();
        assert!(!keys.quit_requested());
        keys.handle_key(KeyCode::F12, ElementState::Pressed, false);
        keys.handle_key(KeyCode::Escape, ElementState::Pressed, false);
        assert!(keys.take_debug_toggle());
        assert!(!keys.take_debug_toggle());
        assert!(keys.quit_requested());
    }
}
