// bubble.rs - Rising bubbles
//
// Continuous stream emitted by a cube while it falls or while the page
// scrolls. Each bubble rises, fades and is culled on the tick its life
// reaches zero.

use glam::Vec3;

use super::{ObjectId, ObjectKind, SimContext};

#[derive(Clone, Debug)]
pub struct Bubble {
    pub id: ObjectId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub life: f32,
    budget: f32,
    age: u32,
}

impl Bubble {
    pub fn opacity(&self, opacity_scale: f32) -> f32 {
        self.life * opacity_scale
    }
}

#[derive(Debug, Default)]
pub struct Bubbles {
    pub list: Vec<Bubble>,
}

impl Bubbles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.list.iter()
    }

    /// Spawn one bubble just below `origin`.
    pub fn spawn(&mut self, origin: Vec3, ctx: &mut SimContext) -> ObjectId {
        let config = ctx.config;
        let cfg = &config.bubble;
        let rng = &mut *ctx.rng;

        let radius = rng.next_f32() * cfg.radius_range + cfg.radius_min;
        let position = origin
            + Vec3::new(rng.centered() * cfg.jitter, -cfg.drop, rng.centered() * cfg.jitter);
        let velocity = Vec3::new(
            rng.centered() * cfg.drift,
            rng.next_f32() * cfg.rise_range + cfg.rise_min,
            rng.centered() * cfg.drift,
        );

        let id = ctx.scene.add(ObjectKind::Bubble, radius);
        self.list.push(Bubble {
            id,
            position,
            velocity,
            radius,
            life: cfg.life,
            budget: cfg.life,
            age: 0,
        });
        id
    }

    /// Move, fade and cull.
    pub fn update(&mut self, ctx: &mut SimContext) {
        let decay = ctx.config.bubble.decay;
        let scene = &mut *ctx.scene;

        self.list.retain_mut(|b| {
            b.position += b.velocity;
            b.age += 1;
            b.life = b.budget - decay * b.age as f32;
            if b.life > 0.0 {
                return true;
            }
            scene.remove(b.id);
            false
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;
    use crate::sim::{RandomSource, SceneEvent, SceneLog};
    use crate::viewport::ScrollSample;

    struct Fixed(f32);
    impl RandomSource for Fixed {
        fn next_f32(&mut self) -> f32 { self.0 }
    }

    #[test]
    fn spawns_below_origin_and_rises() {
        let config = MotionConfig::default();
        let mut rng = Fixed(0.5);
        let mut scene = SceneLog::new();
        let mut ctx = SimContext::new(ScrollSample::default(), &config, &mut rng, &mut scene);

        let mut bubbles = Bubbles::new();
        let origin = Vec3::new(4.0, 10.0, 0.0);
        bubbles.spawn(origin, &mut ctx);

        let b = &bubbles.list[0];
        assert_eq!(b.position, Vec3::new(4.0, 9.0, 0.0));
        assert!((b.velocity.y - 0.045).abs() < 1e-6);
        assert!((b.radius - 0.15).abs() < 1e-6);
        assert!((b.opacity(0.3) - 0.6).abs() < 1e-6);

        bubbles.update(&mut ctx);
        assert!(bubbles.list[0].position.y > 9.0);
    }

    #[test]
    fn culled_on_the_two_hundredth_tick() {
        let config = MotionConfig::default();
        let mut rng = Fixed(0.5);
        let mut scene = SceneLog::new();
        let mut ctx = SimContext::new(ScrollSample::default(), &config, &mut rng, &mut scene);

        let mut bubbles = Bubbles::new();
        let id = bubbles.spawn(Vec3::ZERO, &mut ctx);
        for tick in 1..200 {
            bubbles.update(&mut ctx);
            assert_eq!(bubbles.len(), 1, "bubble missing at tick {tick}");
            assert!(bubbles.list[0].life > 0.0);
        }
        bubbles.update(&mut ctx);
        assert!(bubbles.is_empty());
        assert_eq!(scene.pending().last(), Some(&SceneEvent::Removed { id }));
    }
}
