use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self { key, action: KeyAction::Pressed }
    }

    pub fn released(key: Key) -> Self {
        Self { key, action: KeyAction::Released }
    }
}

/// FIFO of key events waiting for the next frame's input stage.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<KeyEvent>,
    keys_held: HashSet<Key>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: KeyEvent) {
        match event.action {
            KeyAction::Pressed => {
                self.keys_held.insert(event.key);
            }
            KeyAction::Released => {
                self.keys_held.remove(&event.key);
            }
        }
        self.events.push_back(event);
    }

    /// Queue a press. Repeats while the key is already held are dropped.
    pub fn press(&mut self, key: Key) {
        if !self.keys_held.contains(&key) {
            self.push(KeyEvent::pressed(key));
        }
    }

    pub fn release(&mut self, key: Key) {
        self.push(KeyEvent::released(key));
    }

    /// Press and release in one go.
    pub fn tap(&mut self, key: Key) {
        self.press(key);
        self.release(key);
    }

    pub fn is_key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// What a bound key does when released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Quit,
    Load(PathBuf),
}

/// Maps keys to engine actions.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<Key, Binding>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape quits and the digit keys load `scenes` in order, `0` first.
    /// Scenes past the tenth are left unbound.
    pub fn with_scenes(scenes: &[PathBuf]) -> Self {
        let mut map = Self::new();
        map.bind(Key::Escape, Binding::Quit);
        for (digit, scene) in ('0'..='9').zip(scenes) {
            map.bind(Key::Char(digit), Binding::Load(scene.clone()));
        }
        map
    }

    pub fn bind(&mut self, key: Key, binding: Binding) {
        self.bindings.insert(key, binding);
    }

    pub fn unbind(&mut self, key: Key) -> Option<Binding> {
        self.bindings.remove(&key)
    }

    pub fn get(&self, key: Key) -> Option<&Binding> {
        self.bindings.get(&key)
    }

    /// The binding triggered by `event`, if any. Only releases trigger.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&Binding> {
        match event.action {
            KeyAction::Released => self.get(event.key),
            KeyAction::Pressed => None,
        }
    }
}
