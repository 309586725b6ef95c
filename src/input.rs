//! Input state: keyboard and on-screen buttons folded into a control snapshot.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::boat::ControlIntent;
use crate::overlay::Button;

pub struct InputState {
    keys_held: HashSet<KeyCode>,

    /// Last cursor position (pixels), `None` once the cursor leaves the window
    cursor: Option<Vec2>,
    /// On-screen button currently held with the mouse
    pub held_button: Option<Button>,

    spawn_requested: bool,

    pub window_size: Vec2,
}

impl InputState {
    pub fn new(window_size: Vec2) -> Self {
        Self {
            keys_held: HashSet::new(),
            cursor: None,
            held_button: None,
            spawn_requested: false,
            window_size,
        }
    }

    /// Feed a winit WindowEvent into the input state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if pressed && !event.repeat && key == KeyCode::Space {
                        self.request_spawn();
                    }
                    self.set_key(key, pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => self.pointer_left(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.pointer_pressed(),
                ElementState::Released => self.pointer_released(),
            },
            WindowEvent::Resized(size) => {
                self.window_size = Vec2::new(size.width as f32, size.height as f32);
            }
            WindowEvent::Focused(false) => {
                self.keys_held.clear();
                self.held_button = None;
            }
            _ => {}
        }
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.cursor = Some(position);
        // Sliding off a held button counts as leaving it
        if let Some(button) = self.held_button {
            if !button.rect(self.window_size).contains(position) {
                self.held_button = None;
            }
        }
    }

    pub fn pointer_pressed(&mut self) {
        self.held_button = self
            .cursor
            .and_then(|cursor| Button::at(cursor, self.window_size));
    }

    pub fn pointer_released(&mut self) {
        self.held_button = None;
    }

    pub fn pointer_left(&mut self) {
        self.cursor = None;
        self.held_button = None;
    }

    /// Request a manual wave spawn (Space)
    pub fn request_spawn(&mut self) {
        self.spawn_requested = true;
    }

    /// Returns whether a spawn was requested since the last call
    pub fn take_spawn_request(&mut self) -> bool {
        std::mem::take(&mut self.spawn_requested)
    }

    /// Current control intent from held keys and buttons
    pub fn snapshot(&self) -> ControlIntent {
        let any = |keys: [KeyCode; 2]| keys.iter().any(|k| self.keys_held.contains(k));
        let button = |b: Button| self.held_button == Some(b);
        ControlIntent {
            forward: any([KeyCode::KeyW, KeyCode::ArrowUp]) || button(Button::Forward),
            backward: any([KeyCode::KeyS, KeyCode::ArrowDown]) || button(Button::Backward),
            left: any([KeyCode::KeyA, KeyCode::ArrowLeft]) || button(Button::Left),
            right: any([KeyCode::KeyD, KeyCode::ArrowRight]) || button(Button::Right),
        }
    }
}
