// sim/ - Cube motion simulation
//
// One motion controller per decorative cube, each owning the bubbles and
// splashes it emits. `World` is the per-frame driver: sample scroll once,
// update every cube, hand the result to a renderer.

mod bubble;
mod context;
mod cube;
mod splash;

pub use bubble::{Bubble, Bubbles};
pub use context::{ObjectId, ObjectKind, RandomSource, SceneEvent, SceneLog, SimContext, XorShift32};
pub use cube::{MotionController, Phase, Spin, Transform};
pub use splash::{SplashParticle, SplashShape, Splashes};

use crate::config::MotionConfig;
use crate::render::{Pose, Renderer};
use crate::viewport::{self, CubeSpec, ScrollSample, ScrollSampler, Viewport};

/// A cube together with its page placement.
pub struct Cube {
    pub spec: CubeSpec,
    pub motion: MotionController,
    pub visible: bool,
}

pub struct World<R: RandomSource = XorShift32> {
    config: MotionConfig,
    cubes: Vec<Cube>,
    scene: SceneLog,
    rng: R,

    // Last snapshot taken from the page
    scroll: ScrollSample,
    viewport: Viewport,

    ticks: u64,
}

impl<R: RandomSource> World<R> {
    pub fn new<S: ScrollSampler>(config: MotionConfig, specs: &[CubeSpec], sampler: &S, mut rng: R) -> Self {
        let scroll = sampler.sample();
        let viewport = sampler.viewport_extent();
        let mut scene = SceneLog::new();

        let cubes = {
            let mut ctx = SimContext::new(scroll, &config, &mut rng, &mut scene);
            specs
                .iter()
                .map(|spec| {
                    let origin = viewport::spawn_position(spec, config.start_height, &config.layout);
                    Cube {
                        spec: *spec,
                        motion: MotionController::new(origin, spec.y_offset, spec.size, &mut ctx),
                        visible: true,
                    }
                })
                .collect()
        };

        let mut world = Self { config, cubes, scene, rng, scroll, viewport, ticks: 0 };
        world.apply_layout();
        log::info!(
            "world: {} cubes, viewport {}x{}",
            world.cubes.len(),
            viewport.width,
            viewport.height,
        );
        world
    }

    /// One frame: sample, update every cube, present.
    pub fn tick<S: ScrollSampler, D: Renderer>(&mut self, sampler: &S, renderer: &mut D) {
        self.scroll = sampler.sample();
        self.step();
        self.present(renderer);
    }

    /// Advance the simulation without presenting; events stay queued.
    pub fn step(&mut self) {
        let mut ctx = SimContext::new(self.scroll, &self.config, &mut self.rng, &mut self.scene);
        for cube in &mut self.cubes {
            cube.motion.update(&mut ctx);
        }
        self.ticks += 1;
    }

    pub fn present<D: Renderer>(&mut self, renderer: &mut D) {
        renderer.begin();
        for event in self.scene.drain() {
            match event {
                SceneEvent::Added { id, kind, size } => renderer.add_object(id, kind, size),
                SceneEvent::Removed { id } => renderer.remove_object(id),
            }
        }

        let bubble_opacity = self.config.bubble.opacity_scale;
        let splash_opacity = self.config.splash.opacity_scale;
        for cube in &self.cubes {
            let visible = cube.visible;
            renderer.draw(cube.motion.id(), &cube.motion.pose(visible));
            for b in cube.motion.bubbles.iter() {
                renderer.draw(b.id, &Pose::plain(b.position, b.opacity(bubble_opacity), visible));
            }
            for p in cube.motion.splashes.iter() {
                let pose = Pose {
                    rotation: p.rotation,
                    ..Pose::plain(p.position, p.opacity(splash_opacity), visible)
                };
                renderer.draw(p.id, &pose);
            }
        }
        renderer.render();
    }

    /// React to a viewport change: retarget every cube and re-apply the
    /// mobile/desktop placement.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll.viewport_height = viewport.height;
        let ratio = self.scroll.ratio();
        for cube in &mut self.cubes {
            cube.motion.retarget(viewport.height, ratio, &self.config);
        }
        self.apply_layout();
    }

    fn apply_layout(&mut self) {
        let mobile = viewport::is_mobile(self.viewport, &self.config.layout);
        for cube in &mut self.cubes {
            let placement = viewport::place(&cube.spec, self.viewport, &self.config.layout);
            cube.visible = placement.visible;
            if let Some((x, z)) = placement.moved_to {
                cube.motion.transform.position.x = x;
                cube.motion.transform.position.z = z;
            }
        }
        log::info!("layout: {}", if mobile { "mobile" } else { "desktop" });
    }

    /// Splash from cube `index`. Returns the particle count, 0 for an
    /// unknown index.
    pub fn splash(&mut self, index: usize) -> usize {
        let Some(cube) = self.cubes.get_mut(index) else { return 0 };
        let mut ctx = SimContext::new(self.scroll, &self.config, &mut self.rng, &mut self.scene);
        cube.motion.splash(&mut ctx)
    }

    pub fn cubes(&self) -> &[Cube] { &self.cubes }
    pub fn config(&self) -> &MotionConfig { &self.config }
    pub fn scroll(&self) -> ScrollSample { self.scroll }
    pub fn viewport(&self) -> Viewport { self.viewport }
    pub fn ticks(&self) -> u64 { self.ticks }

    pub fn settled_count(&self) -> usize {
        self.cubes.iter().filter(|c| c.motion.phase() == Phase::Settled).count()
    }

    /// Live particles across every cube.
    pub fn particle_count(&self) -> usize {
        self.cubes
            .iter()
            .map(|c| c.motion.bubbles.len() + c.motion.splashes.len())
            .sum()
    }
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }
