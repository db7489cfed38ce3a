use std::collections::HashMap;

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::{Keycode, Mod},
    mouse::MouseButton,
    EventPump,
};
use smallvec::SmallVec;

use crate::{
    events::{GameCommand, GameEvent, PointerButton, PointerEvent},
    map::direction::Direction,
};

/// Whether the window has keyboard focus; the loop sleeps less precisely without it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WindowFocus(pub bool);

impl Default for WindowFocus {
    fn default() -> Self {
        Self(true)
    }
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    /// Commands fired once on key down.
    key_bindings: HashMap<Keycode, GameCommand>,
    /// Keys held to walk.
    walk_keys: HashMap<Keycode, Direction>,
    /// Keys held to swing the tool at a neighbouring cell.
    act_keys: HashMap<Keycode, Direction>,
    /// Commands that need Ctrl held.
    ctrl_bindings: HashMap<Keycode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let walk_keys = HashMap::from([
            (Keycode::Up, Direction::Up),
            (Keycode::W, Direction::Up),
            (Keycode::Kp8, Direction::Up),
            (Keycode::Down, Direction::Down),
            (Keycode::S, Direction::Down),
            (Keycode::Kp2, Direction::Down),
            (Keycode::Left, Direction::Left),
            (Keycode::A, Direction::Left),
            (Keycode::Kp4, Direction::Left),
            (Keycode::Right, Direction::Right),
            (Keycode::D, Direction::Right),
            (Keycode::Kp6, Direction::Right),
        ]);

        let act_keys = HashMap::from([
            (Keycode::I, Direction::Up),
            (Keycode::J, Direction::Left),
            (Keycode::K, Direction::Down),
            (Keycode::L, Direction::Right),
        ]);

        let mut key_bindings = HashMap::new();

        // Hotbar
        let digits = [
            Keycode::Num1,
            Keycode::Num2,
            Keycode::Num3,
            Keycode::Num4,
            Keycode::Num5,
            Keycode::Num6,
            Keycode::Num7,
            Keycode::Num8,
            Keycode::Num9,
            Keycode::Num0,
        ];
        for (slot, key) in digits.into_iter().enumerate() {
            key_bindings.insert(key, GameCommand::SelectSlot(slot));
        }

        // View
        key_bindings.insert(Keycode::Plus, GameCommand::Zoom(1));
        key_bindings.insert(Keycode::Equals, GameCommand::Zoom(1));
        key_bindings.insert(Keycode::KpPlus, GameCommand::Zoom(1));
        key_bindings.insert(Keycode::Minus, GameCommand::Zoom(-1));
        key_bindings.insert(Keycode::KpMinus, GameCommand::Zoom(-1));
        key_bindings.insert(Keycode::F11, GameCommand::ToggleFullscreen);

        // Game actions
        key_bindings.insert(Keycode::Escape, GameCommand::ToggleCrafting);
        key_bindings.insert(Keycode::Return, GameCommand::Craft);
        key_bindings.insert(Keycode::KpEnter, GameCommand::Craft);
        key_bindings.insert(Keycode::Question, GameCommand::Census);
        key_bindings.insert(Keycode::Slash, GameCommand::Census);
        key_bindings.insert(Keycode::F3, GameCommand::ToggleDebug);

        let ctrl_bindings = HashMap::from([(Keycode::Q, GameCommand::Exit)]);

        Self {
            key_bindings,
            walk_keys,
            act_keys,
            ctrl_bindings,
        }
    }
}

impl Bindings {
    /// The command a fresh key press maps to.
    pub fn key_down(&self, key: Keycode, ctrl: bool) -> Option<GameCommand> {
        if ctrl {
            if let Some(command) = self.ctrl_bindings.get(&key) {
                return Some(*command);
            }
        }
        if let Some(direction) = self.walk_keys.get(&key) {
            return Some(GameCommand::WalkBegin(*direction));
        }
        if let Some(direction) = self.act_keys.get(&key) {
            return Some(GameCommand::ActBegin(*direction));
        }
        self.key_bindings.get(&key).copied()
    }

    /// Held keys report their release; everything else is ignored.
    pub fn key_up(&self, key: Keycode) -> Option<GameCommand> {
        if let Some(direction) = self.walk_keys.get(&key) {
            return Some(GameCommand::WalkEnd(*direction));
        }
        self.act_keys.get(&key).map(|_| GameCommand::ActEnd)
    }
}

/// A keyboard event stripped of SDL's bookkeeping, so key handling can be driven without a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleKeyEvent {
    KeyDown(Keycode),
    /// Pressed with Ctrl held.
    CtrlKeyDown(Keycode),
    KeyUp(Keycode),
}

pub fn process_simple_key_events(bindings: &Bindings, frame_events: &[SimpleKeyEvent]) -> SmallVec<[GameEvent; 4]> {
    frame_events
        .iter()
        .filter_map(|event| match *event {
            SimpleKeyEvent::KeyDown(key) => bindings.key_down(key, false),
            SimpleKeyEvent::CtrlKeyDown(key) => bindings.key_down(key, true),
            SimpleKeyEvent::KeyUp(key) => bindings.key_up(key),
        })
        .map(GameEvent::Command)
        .collect()
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Drains SDL's queue into game commands and pointer events.
pub fn input_system(
    bindings: Res<Bindings>,
    mut writer: EventWriter<GameEvent>,
    mut pointer: EventWriter<PointerEvent>,
    mut focus: ResMut<WindowFocus>,
    mut pump: NonSendMut<&'static mut EventPump>,
) {
    let mut frame_events: SmallVec<[SimpleKeyEvent; 8]> = SmallVec::new();

    for event in pump.poll_iter() {
        match event {
            Event::Quit { .. } => {
                writer.write(GameEvent::Command(GameCommand::Exit));
            }
            Event::Window { win_event, .. } => match win_event {
                WindowEvent::SizeChanged(width, height) => {
                    writer.write(GameEvent::Resized {
                        width: width.max(1) as u32,
                        height: height.max(1) as u32,
                    });
                }
                WindowEvent::FocusGained => focus.0 = true,
                WindowEvent::FocusLost => focus.0 = false,
                _ => {}
            },
            Event::KeyDown {
                keycode: Some(key),
                keymod,
                repeat: false,
                ..
            } => {
                if keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD) {
                    frame_events.push(SimpleKeyEvent::CtrlKeyDown(key));
                } else {
                    frame_events.push(SimpleKeyEvent::KeyDown(key));
                }
            }
            Event::KeyUp {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                frame_events.push(SimpleKeyEvent::KeyUp(key));
            }
            Event::MouseButtonDown { mouse_btn, x, y, .. } => {
                if let Some(button) = pointer_button(mouse_btn) {
                    pointer.write(PointerEvent::Pressed { button, x, y });
                }
            }
            Event::MouseButtonUp { mouse_btn, x, y, .. } => {
                if let Some(button) = pointer_button(mouse_btn) {
                    pointer.write(PointerEvent::Released { button, x, y });
                }
            }
            Event::MouseMotion { x, y, .. } => {
                pointer.write(PointerEvent::Moved { x, y });
            }
            Event::MouseWheel { y, .. } if y != 0 => {
                pointer.write(PointerEvent::Scrolled(y));
            }
            _ => {}
        }
    }

    for event in process_simple_key_events(&bindings, &frame_events) {
        writer.write(event);
    }
}
