// cube.rs - Per-cube motion controller
//
// Two phases. Falling eases the cube from above the screen down to its
// rest height, spinning hard while far away. Settled couples height, scale
// and spin to the page scroll. The cube owns the bubbles and splashes it
// emits.

use glam::Vec3;

use super::{Bubbles, ObjectId, ObjectKind, SimContext, Splashes, lerp};
use crate::config::MotionConfig;
use crate::render::Pose;
use crate::viewport::{bottom_of_screen, rest_y};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Settled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, left unwrapped.
    pub rotation: Vec3,
    pub scale: f32,
}

/// Rotation speeds per axis, radians per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub current: Vec3,
    /// Idle speed once settled.
    pub base: Vec3,
    /// Falling speed, and the ceiling under fast scroll.
    pub initial: Vec3,
}

impl Spin {
    pub fn from_raw(raw: Vec3, cfg: &MotionConfig) -> Self {
        let initial = raw * cfg.initial_spin_factor;
        Self {
            current: initial,
            base: raw * cfg.base_spin_factor,
            initial,
        }
    }
}

pub struct MotionController {
    id: ObjectId,
    pub transform: Transform,
    phase: Phase,
    y_offset: f32,
    /// Fall target while falling; the rest anchor once settled.
    anchor_y: f32,
    bottom_y: f32,
    spin: Spin,
    direction: f32,
    last_scroll: f32,
    initial_scale: f32,
    final_scale: f32,
    pub bubbles: Bubbles,
    pub splashes: Splashes,
}

impl MotionController {
    /// Place a new cube at `origin`, heading for the rest height that the
    /// current viewport and scroll position imply.
    pub fn new(origin: Vec3, y_offset: f32, size: f32, ctx: &mut SimContext) -> Self {
        let cfg = ctx.config;
        let raw = Vec3::new(ctx.rng.signed(), ctx.rng.signed(), ctx.rng.signed()) * cfg.spin_range;
        Self::with_spin(origin, y_offset, size, Spin::from_raw(raw, cfg), ctx)
    }

    /// Like `new`, with explicit rotation speeds.
    pub fn with_spin(origin: Vec3, y_offset: f32, size: f32, spin: Spin, ctx: &mut SimContext) -> Self {
        let cfg = ctx.config;
        let vh = ctx.scroll.viewport_height;
        let rest = rest_y(vh, y_offset, &cfg.layout);
        let bottom_y = bottom_of_screen(vh, y_offset, &cfg.layout);
        let initial_scale = size / cfg.scale_divisor;

        Self {
            id: ctx.scene.add(ObjectKind::Cube, size),
            transform: Transform { position: origin, rotation: Vec3::ZERO, scale: initial_scale },
            phase: Phase::Falling,
            y_offset,
            anchor_y: lerp(rest, bottom_y, ctx.scroll.ratio()),
            bottom_y,
            spin,
            direction: 1.0,
            last_scroll: ctx.scroll.offset_y,
            initial_scale,
            final_scale: initial_scale * cfg.final_scale_ratio,
            bubbles: Bubbles::new(),
            splashes: Splashes::new(),
        }
    }

    pub fn id(&self) -> ObjectId { self.id }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn spin(&self) -> Spin { self.spin }
    pub fn rotation_direction(&self) -> f32 { self.direction }
    pub fn last_scroll(&self) -> f32 { self.last_scroll }
    pub fn bottom_of_screen(&self) -> f32 { self.bottom_y }

    pub fn fall_target(&self) -> Option<f32> {
        (self.phase == Phase::Falling).then_some(self.anchor_y)
    }

    pub fn rest_anchor(&self) -> Option<f32> {
        (self.phase == Phase::Settled).then_some(self.anchor_y)
    }

    /// Advance one tick: motion for the current phase, then particles.
    pub fn update(&mut self, ctx: &mut SimContext) {
        match self.phase {
            Phase::Falling => self.fall(ctx),
            Phase::Settled => self.drift(ctx),
        }
        self.bubbles.update(ctx);
        self.splashes.update(ctx);
    }

    fn fall(&mut self, ctx: &mut SimContext) {
        let cfg = ctx.config;
        let distance = self.anchor_y - self.transform.position.y;
        // Track scroll here too; the first settled velocity is one tick of change.
        self.last_scroll = ctx.scroll.offset_y;

        self.transform.position.y += distance * cfg.fall_ease;
        self.transform.rotation += self.spin.current * (-distance * cfg.rotation_fall_gain);

        // Most bubbles at the start of the fall, none at rest.
        if ctx.rng.chance(distance.abs() * cfg.bubble.fall_rate) {
            self.bubbles.spawn(self.transform.position, ctx);
        }

        if distance.abs() <= cfg.settle_epsilon {
            self.anchor_y = self.transform.position.y;
            self.phase = Phase::Settled;
            self.spin.current = self.spin.base;
            log::debug!("cube {} settled at y={:.3}", self.id.0, self.anchor_y);

            if cfg.splash.on_settle {
                self.splashes.burst(self.transform.position, ctx);
            }
        }
    }

    fn drift(&mut self, ctx: &mut SimContext) {
        let cfg = ctx.config;
        let offset = ctx.scroll.offset_y;
        let velocity = (offset - self.last_scroll) * cfg.scroll_velocity_scale;
        self.last_scroll = offset;

        // Keep spinning the last observed way once scrolling stops.
        if velocity != 0.0 {
            self.direction = velocity.signum();
        }

        let ratio = ctx.scroll.ratio();
        let target_y = lerp(self.anchor_y, self.bottom_y, ratio);
        self.transform.scale = lerp(self.initial_scale, self.final_scale, ratio);
        self.transform.position.y += (target_y - self.transform.position.y) * cfg.scroll_ease;

        let t = (velocity.abs() * cfg.spin_velocity_gain).min(1.0);
        let target_spin = self.spin.base.lerp(self.spin.initial, t);
        self.spin.current = self.spin.current.lerp(target_spin, cfg.spin_smoothing);
        self.transform.rotation += self.spin.current * self.direction;

        if ctx.rng.chance(velocity.abs() * cfg.bubble.scroll_rate) {
            self.bubbles.spawn(self.transform.position, ctx);
        }
    }

    /// Recompute the viewport-derived heights. A falling cube gets a new
    /// target; a settled cube keeps its rest anchor.
    pub fn retarget(&mut self, viewport_height: f32, scroll_ratio: f32, cfg: &MotionConfig) {
        let rest = rest_y(viewport_height, self.y_offset, &cfg.layout);
        self.bottom_y = bottom_of_screen(viewport_height, self.y_offset, &cfg.layout);
        if self.phase == Phase::Falling {
            self.anchor_y = lerp(rest, self.bottom_y, scroll_ratio);
        }
    }

    /// Splash from the cube's current position.
    pub fn splash(&mut self, ctx: &mut SimContext) -> usize {
        self.splashes.burst(self.transform.position, ctx)
    }

    pub fn pose(&self, visible: bool) -> Pose {
        Pose {
            position: self.transform.position,
            rotation: self.transform.rotation,
            scale: self.transform.scale,
            opacity: 1.0,
            visible,
        }
    }
}
