// splash.rs - Water splash bursts
//
// One-shot impact effect: a fixed-size burst of tumbling boxes and spheres
// thrown upward, pulled back by gravity and faded out.

use glam::Vec3;

use super::{ObjectId, ObjectKind, SimContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplashShape {
    Box,
    Sphere,
}

impl SplashShape {
    pub fn kind(self) -> ObjectKind {
        match self {
            SplashShape::Box => ObjectKind::SplashBox,
            SplashShape::Sphere => ObjectKind::SplashSphere,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SplashParticle {
    pub id: ObjectId,
    pub shape: SplashShape,
    /// Box edge, or sphere diameter.
    pub size: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub life: f32,
    budget: f32,
    age: u32,
}

impl SplashParticle {
    pub fn opacity(&self, opacity_scale: f32) -> f32 {
        self.life * opacity_scale
    }

    /// Life the particle was created with.
    pub fn budget(&self) -> f32 {
        self.budget
    }
}

#[derive(Debug, Default)]
pub struct Splashes {
    pub list: Vec<SplashParticle>,
}

impl Splashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SplashParticle> {
        self.list.iter()
    }

    /// Throw a full burst from `at`. Returns the number of particles created.
    pub fn burst(&mut self, at: Vec3, ctx: &mut SimContext) -> usize {
        let config = ctx.config;
        let cfg = &config.splash;
        let count = cfg.burst_count;

        self.list.reserve(count);
        for _ in 0..count {
            let rng = &mut *ctx.rng;

            let shape = if rng.next_f32() > cfg.box_threshold { SplashShape::Box } else { SplashShape::Sphere };
            let size = rng.next_f32() * cfg.size_range + cfg.size_min;
            let velocity = Vec3::new(
                rng.centered() * cfg.spread * cfg.speed,
                rng.next_f32() * cfg.lift_range * cfg.speed + cfg.lift_min * cfg.speed,
                rng.centered() * cfg.spread * cfg.speed,
            );
            let rotation = Vec3::new(
                rng.centered() * cfg.tumble,
                rng.centered() * cfg.tumble,
                rng.centered() * cfg.tumble,
            );
            let life = rng.next_f32() * cfg.life_range + cfg.life_min;

            let id = ctx.scene.add(shape.kind(), size);
            self.list.push(SplashParticle {
                id,
                shape,
                size,
                position: at,
                velocity,
                rotation,
                life,
                budget: life,
                age: 0,
            });
        }

        log::debug!("splash burst of {count} at ({:.2}, {:.2}, {:.2})", at.x, at.y, at.z);
        count
    }

    /// Apply gravity, move, fade and cull.
    pub fn update(&mut self, ctx: &mut SimContext) {
        let cfg = &ctx.config.splash;
        let gravity = cfg.gravity * cfg.speed;
        let decay = cfg.decay;
        let scene = &mut *ctx.scene;

        self.list.retain_mut(|p| {
            p.velocity.y += gravity;
            p.position += p.velocity;
            p.age += 1;
            p.life = p.budget - decay * p.age as f32;
            if p.life > 0.0 {
                return true;
            }
            scene.remove(p.id);
            false
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;
    use crate::sim::{SceneLog, XorShift32};
    use crate::viewport::ScrollSample;

    #[test]
    fn burst_is_always_twenty() {
        let config = MotionConfig::default();
        let mut rng = XorShift32::new(42);
        let mut scene = SceneLog::new();
        let mut ctx = SimContext::new(ScrollSample::default(), &config, &mut rng, &mut scene);

        let mut splashes = Splashes::new();
        assert_eq!(splashes.burst(Vec3::ZERO, &mut ctx), 20);
        assert_eq!(splashes.len(), 20);
        assert_eq!(splashes.burst(Vec3::ONE, &mut ctx), 20);
        assert_eq!(splashes.len(), 40);
        assert_eq!(scene.pending().len(), 40);
    }

    #[test]
    fn gravity_pulls_velocity_down() {
        let config = MotionConfig::default();
        let mut rng = XorShift32::new(9);
        let mut scene = SceneLog::new();
        let mut ctx = SimContext::new(ScrollSample::default(), &config, &mut rng, &mut scene);

        let mut splashes = Splashes::new();
        splashes.burst(Vec3::ZERO, &mut ctx);
        let before: Vec<f32> = splashes.iter().map(|p| p.velocity.y).collect();
        splashes.update(&mut ctx);
        for (p, v0) in splashes.iter().zip(before) {
            assert!((p.velocity.y - (v0 - 0.0045)).abs() < 1e-6);
        }
    }

    #[test]
    fn every_particle_eventually_expires() {
        let config = MotionConfig::default();
        let mut rng = XorShift32::new(3);
        let mut scene = SceneLog::new();
        let mut ctx = SimContext::new(ScrollSample::default(), &config, &mut rng, &mut scene);

        let mut splashes = Splashes::new();
        splashes.burst(Vec3::ZERO, &mut ctx);
        // 6.5 / 0.02 = 325 ticks is the longest possible life.
        for _ in 0..325 {
            splashes.update(&mut ctx);
            assert!(splashes.iter().all(|p| p.life > 0.0));
        }
        assert!(splashes.is_empty());
    }
}
