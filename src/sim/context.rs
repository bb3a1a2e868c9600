// context.rs - Per-tick simulation context
//
// Everything a controller may touch during its update: the tick's scroll
// snapshot, the tuning, the random source and the scene bookkeeping.
// Nothing global.

use crate::config::MotionConfig;
use crate::viewport::ScrollSample;

/// Uniform random numbers for spawn decisions and particle jitter.
pub trait RandomSource {
    /// Sample in [0, 1).
    fn next_f32(&mut self) -> f32;

    /// Sample in [-1, 1).
    #[inline]
    fn signed(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }

    /// Sample in [-0.5, 0.5).
    #[inline]
    fn centered(&mut self) -> f32 {
        self.next_f32() - 0.5
    }

    /// Bernoulli draw; `p` outside [0, 1] saturates.
    #[inline]
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// xorshift32, the same generator the rain effect uses.
#[derive(Clone, Debug)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift.
        Self { state: if seed == 0 { 0xDEADBEEF } else { seed } }
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(0xDEADBEEF)
    }
}

impl RandomSource for XorShift32 {
    #[inline(always)]
    fn next_f32(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state >> 8) as f32 * (1.0 / 16777216.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// What the renderer should build for an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ObjectKind {
    Cube = 0,
    Bubble = 1,
    SplashBox = 2,
    SplashSphere = 3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    Added { id: ObjectId, kind: ObjectKind, size: f32 },
    Removed { id: ObjectId },
}

/// Id allocation plus the add/remove events not yet handed to a renderer.
#[derive(Debug, Default)]
pub struct SceneLog {
    next_id: u32,
    events: Vec<SceneEvent>,
}

impl SceneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ObjectKind, size: f32) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.events.push(SceneEvent::Added { id, kind, size });
        id
    }

    pub fn remove(&mut self, id: ObjectId) {
        self.events.push(SceneEvent::Removed { id });
    }

    pub fn pending(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SceneEvent> {
        self.events.drain(..)
    }

    /// Discard pending events without replaying them.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

pub struct SimContext<'a> {
    pub scroll: ScrollSample,
    pub config: &'a MotionConfig,
    pub rng: &'a mut dyn RandomSource,
    pub scene: &'a mut SceneLog,
}

impl<'a> SimContext<'a> {
    pub fn new(
        scroll: ScrollSample,
        config: &'a MotionConfig,
        rng: &'a mut dyn RandomSource,
        scene: &'a mut SceneLog,
    ) -> Self {
        Self { scroll, config, rng, scene }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift_stays_in_unit_interval() {
        let mut rng = XorShift32::new(7);
        for _ in 0..10_000 {
            let r = rng.next_f32();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = XorShift32::new(0);
        let a = rng.next_f32();
        let b = rng.next_f32();
        assert_ne!(a, b);
    }

    #[test]
    fn scene_log_hands_out_fresh_ids() {
        let mut log = SceneLog::new();
        let a = log.add(ObjectKind::Cube, 3.0);
        let b = log.add(ObjectKind::Bubble, 0.1);
        log.remove(a);
        assert_ne!(a, b);
        let events: Vec<_> = log.drain().collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], SceneEvent::Removed { id: a });
        assert!(log.pending().is_empty());
    }
}
