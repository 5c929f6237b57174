//! Per-frame multi-touch snapshot.
//!
//! A fixed number of finger slots ([`MAX_FINGER_POINTS`]) is tracked. A slot
//! that is not touching still remembers its last known position so release
//! notifications can report where the finger lifted.

use arrayvec::ArrayVec;
use raylib::prelude::Vector2;

/// Number of finger slots tracked by [`TouchState`].
pub const MAX_FINGER_POINTS: usize = 10;

/// One finger slot.
#[derive(Debug, Clone, Copy)]
pub struct FingerState {
    /// The finger is on the surface this frame.
    pub touching: bool,
    /// The finger went down this frame.
    pub pressed: bool,
    /// The finger moved since the previous frame.
    pub moved: bool,
    /// Current (or last known) position in screen pixels.
    pub position: Vector2,
    /// Pressure in `0.0..=1.0`.
    pub pressure: f32,
}

impl Default for FingerState {
    fn default() -> Self {
        Self {
            touching: false,
            pressed: false,
            moved: false,
            position: Vector2::zero(),
            pressure: 0.0,
        }
    }
}

/// Snapshot of every finger slot for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchState {
    fingers: [FingerState; MAX_FINGER_POINTS],
}

impl TouchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of finger slots.
    pub fn max_finger_points(&self) -> usize {
        MAX_FINGER_POINTS
    }

    /// Start a new frame: clears the per-frame `pressed`/`moved` edges.
    pub fn next_frame(&mut self) {
        for finger in self.fingers.iter_mut() {
            finger.pressed = false;
            finger.moved = false;
        }
    }

    /// Report a finger at `(x, y)` this frame. Out-of-range slots are ignored.
    pub fn touch(&mut self, finger: usize, x: f32, y: f32, pressure: f32) {
        let Some(slot) = self.fingers.get_mut(finger) else {
            return;
        };
        let position = Vector2 { x, y };
        slot.pressed = !slot.touching;
        slot.moved = slot.touching && (slot.position.x != x || slot.position.y != y);
        slot.touching = true;
        slot.position = position;
        slot.pressure = pressure.clamp(0.0, 1.0);
    }

    /// Report that a finger lifted. Its last position is kept.
    pub fn lift(&mut self, finger: usize) {
        if let Some(slot) = self.fingers.get_mut(finger) {
            slot.touching = false;
            slot.pressed = false;
            slot.moved = false;
            slot.pressure = 0.0;
        }
    }

    pub fn finger(&self, finger: usize) -> Option<&FingerState> {
        self.fingers.get(finger)
    }

    /// Position of a finger that is touching this frame.
    pub fn position(&self, finger: usize) -> Option<Vector2> {
        self.finger(finger)
            .filter(|f| f.touching)
            .map(|f| f.position)
    }

    /// Last reported position of the slot, touching or not.
    pub fn last_known_position(&self, finger: usize) -> Option<Vector2> {
        self.finger(finger).map(|f| f.position)
    }

    pub fn pressed(&self, finger: usize) -> bool {
        self.finger(finger).is_some_and(|f| f.touching && f.pressed)
    }

    pub fn moved(&self, finger: usize) -> bool {
        self.finger(finger).is_some_and(|f| f.touching && f.moved)
    }

    pub fn pressure(&self, finger: usize) -> f32 {
        self.finger(finger).map(|f| f.pressure).unwrap_or(0.0)
    }

    /// Slots currently touching, in slot order.
    pub fn active_fingers(&self) -> ArrayVec<usize, MAX_FINGER_POINTS> {
        self.fingers
            .iter()
            .enumerate()
            .filter(|(_, f)| f.touching)
            .map(|(i, _)| i)
            .collect()
    }
}
