use wasm_bindgen::prelude::*;

// ============================================================================
// CUBE SCENE - Falling cubes, scroll-driven spin and bubbles
// ============================================================================

pub mod config;
pub mod error;
pub mod render;
pub mod scene;
pub mod sim;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::MotionConfig;
pub use error::EngineError;
pub use render::{Encoder, Pose, Renderer};
pub use sim::{MotionController, Phase, World};
pub use viewport::{ScrollSample, ScrollSampler, StaticSampler, Viewport};

use scene::DEFAULT_CUBES;
use sim::XorShift32;

/// Page-driven handle: the host calls `tick` once per animation frame with
/// the current scroll state, then reads the encoder buffers.
#[wasm_bindgen]
pub struct CubeScene {
    world: World,
    encoder: Encoder,
    sampler: StaticSampler,
}

#[wasm_bindgen]
impl CubeScene {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, scroll_y: f32, document_height: f32, seed: u32) -> CubeScene {
        Self::build(MotionConfig::default(), width, height, scroll_y, document_height, seed)
    }

    /// Same as the constructor, with a JSON override of the motion tuning.
    pub fn with_config(
        json: &str,
        width: f32,
        height: f32,
        scroll_y: f32,
        document_height: f32,
        seed: u32,
    ) -> Result<CubeScene, JsValue> {
        let config = MotionConfig::from_json(json)?;
        Ok(Self::build(config, width, height, scroll_y, document_height, seed))
    }

    pub fn tick(&mut self, scroll_y: f32, document_height: f32) {
        self.sampler.offset_y = scroll_y;
        self.sampler.document_height = document_height;
        self.world.tick(&self.sampler, &mut self.encoder);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sampler.viewport = Viewport::new(width, height);
        self.world.resize(self.sampler.viewport);
    }

    /// Splash from cube `index`; returns the number of particles thrown.
    pub fn splash(&mut self, index: usize) -> usize {
        self.world.splash(index)
    }

    pub fn cube_count(&self) -> usize { self.world.cubes().len() }
    pub fn settled_count(&self) -> usize { self.world.settled_count() }
    pub fn particle_count(&self) -> usize { self.world.particle_count() }

    // Accessors for WASM
    pub fn added_ids_ptr(&self) -> *const u32 { self.encoder.added_ids_ptr() }
    pub fn added_ids_len(&self) -> usize { self.encoder.added_ids_len() }
    pub fn added_ptr(&self) -> *const f32 { self.encoder.added_ptr() }
    pub fn added_len(&self) -> usize { self.encoder.added_len() }
    pub fn removed_ptr(&self) -> *const u32 { self.encoder.removed_ptr() }
    pub fn removed_len(&self) -> usize { self.encoder.removed_len() }
    pub fn pose_ids_ptr(&self) -> *const u32 { self.encoder.pose_ids_ptr() }
    pub fn pose_ids_len(&self) -> usize { self.encoder.pose_ids_len() }
    pub fn poses_ptr(&self) -> *const f32 { self.encoder.poses_ptr() }
    pub fn poses_len(&self) -> usize { self.encoder.poses_len() }
}

impl CubeScene {
    fn build(config: MotionConfig, width: f32, height: f32, scroll_y: f32, document_height: f32, seed: u32) -> Self {
        let sampler = StaticSampler::new(scroll_y, document_height, Viewport::new(width, height));
        let world = World::new(config, &DEFAULT_CUBES, &sampler, XorShift32::new(seed));
        Self { world, encoder: Encoder::new(), sampler }
    }

    pub fn world(&self) -> &World { &self.world }
    pub fn encoder(&self) -> &Encoder { &self.encoder }
}
