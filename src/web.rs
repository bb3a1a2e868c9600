// web.rs - Browser glue
//
// Self-driving mode: reads scroll and viewport from the DOM, ticks on
// requestAnimationFrame, retargets on resize and hands each frame's buffers
// to a JS callback `(addedIds, added, removed, poseIds, poses)`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::config::MotionConfig;
use crate::error::EngineError;
use crate::render::Encoder;
use crate::scene::DEFAULT_CUBES;
use crate::sim::{World, XorShift32};
use crate::viewport::{ScrollSampler, Viewport};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

pub struct DomSampler {
    window: web::Window,
    root: web::Element,
}

impl DomSampler {
    pub fn new() -> Result<Self, EngineError> {
        let window = web::window().ok_or(EngineError::MissingDom("window"))?;
        let document = window.document().ok_or(EngineError::MissingDom("document"))?;
        let root = document
            .document_element()
            .ok_or(EngineError::MissingDom("documentElement"))?;
        Ok(Self { window, root })
    }
}

impl ScrollSampler for DomSampler {
    fn current_scroll_offset(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn document_extent(&self) -> f32 {
        self.root.scroll_height() as f32
    }

    fn viewport_extent(&self) -> Viewport {
        let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Viewport::new(px(self.window.inner_width()), px(self.window.inner_height()))
    }
}

/// One-shot frame requests; the loop re-requests every tick.
pub struct AnimationFrames {
    window: web::Window,
}

impl AnimationFrames {
    pub fn request(&self, callback: &Closure<dyn FnMut()>) -> Result<i32, EngineError> {
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(EngineError::js)
    }
}

struct Driver {
    world: World,
    encoder: Encoder,
    sampler: DomSampler,
    on_frame: js_sys::Function,
}

impl Driver {
    fn frame(&mut self) {
        self.world.tick(&self.sampler, &mut self.encoder);

        let args = js_sys::Array::of5(
            &js_sys::Uint32Array::from(self.encoder.added_ids()),
            &js_sys::Float32Array::from(self.encoder.added()),
            &js_sys::Uint32Array::from(self.encoder.removed()),
            &js_sys::Uint32Array::from(self.encoder.pose_ids()),
            &js_sys::Float32Array::from(self.encoder.poses()),
        );
        if let Err(e) = self.on_frame.apply(&JsValue::NULL, &args) {
            log::error!("frame callback threw: {e:?}");
        }
    }
}

/// Start the animation loop with the default cube arrangement.
#[wasm_bindgen]
pub fn run(on_frame: js_sys::Function, config: Option<String>) -> Result<(), JsValue> {
    let config = match config {
        Some(json) => MotionConfig::from_json(&json)?,
        None => MotionConfig::default(),
    };
    let sampler = DomSampler::new()?;
    let window = sampler.window.clone();
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
    let world = World::new(config, &DEFAULT_CUBES, &sampler, XorShift32::new(seed));
    let driver = Rc::new(RefCell::new(Driver { world, encoder: Encoder::new(), sampler, on_frame }));

    {
        let driver = driver.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            let mut d = driver.borrow_mut();
            let viewport = d.sampler.viewport_extent();
            d.world.resize(viewport);
        });
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(EngineError::js)?;
        on_resize.forget();
    }

    let frames = Rc::new(AnimationFrames { window });
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let scheduler = frames.clone();
    *slot.borrow_mut() = Some(Closure::new(move || {
        driver.borrow_mut().frame();
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = scheduler.request(cb) {
                log::error!("requestAnimationFrame failed: {e}");
            }
        }
    }));

    match slot.borrow().as_ref() {
        Some(cb) => frames.request(cb)?,
        None => return Err(EngineError::MissingDom("frame callback").into()),
    };
    log::info!("animation loop started");
    Ok(())
}
