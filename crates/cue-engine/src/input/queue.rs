use glam::Vec2;

/// Input the table understands.
/// Device polling happens in the host; only these abstract signals reach the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer/cursor is at table coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Strike the cue ball with the staged aim.
    Shoot,
    /// Stop the control loop once the current tick completes.
    Quit,
}

/// Input collected between two ticks.
/// The host pushes events between frames; the runner drains it after each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Most recent pointer position in the queue, if any.
    pub fn latest_pointer(&self) -> Option<Vec2> {
        self.events.iter().rev().find_map(|e| match *e {
            InputEvent::PointerMove { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        })
    }

    pub fn shoot_requested(&self) -> bool {
        self.events.iter().any(|e| matches!(e, InputEvent::Shoot))
    }

    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|e| matches!(e, InputEvent::Quit))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
