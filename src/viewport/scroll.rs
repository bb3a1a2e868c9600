// scroll.rs - Scroll and viewport sampling
//
// The sampler is read once per tick; the resulting snapshot is what every
// controller sees for that tick.

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Scroll state for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub offset_y: f32,
    pub document_height: f32,
    pub viewport_height: f32,
}

impl ScrollSample {
    pub fn new(offset_y: f32, document_height: f32, viewport_height: f32) -> Self {
        Self { offset_y, document_height, viewport_height }
    }

    /// Scroll progress through the page in [0, 1].
    /// Pages too short to scroll report 0.
    pub fn ratio(&self) -> f32 {
        let range = self.document_height - self.viewport_height;
        if range <= 0.0 || !range.is_finite() {
            return 0.0;
        }
        (self.offset_y / range).clamp(0.0, 1.0)
    }
}

/// Side-effect free page queries.
pub trait ScrollSampler {
    fn current_scroll_offset(&self) -> f32;
    fn document_extent(&self) -> f32;
    fn viewport_extent(&self) -> Viewport;

    fn sample(&self) -> ScrollSample {
        ScrollSample {
            offset_y: self.current_scroll_offset(),
            document_height: self.document_extent(),
            viewport_height: self.viewport_extent().height,
        }
    }
}

/// Sampler fed with values pushed in from the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaticSampler {
    pub offset_y: f32,
    pub document_height: f32,
    pub viewport: Viewport,
}

impl StaticSampler {
    pub fn new(offset_y: f32, document_height: f32, viewport: Viewport) -> Self {
        Self { offset_y, document_height, viewport }
    }
}

impl ScrollSampler for StaticSampler {
    fn current_scroll_offset(&self) -> f32 { self.offset_y }
    fn document_extent(&self) -> f32 { self.document_height }
    fn viewport_extent(&self) -> Viewport { self.viewport }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_progress_through_scroll_range() {
        let s = ScrollSample::new(250.0, 1500.0, 1000.0);
        assert!((s.ratio() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ratio_clamps_overscroll() {
        assert_eq!(ScrollSample::new(900.0, 1500.0, 1000.0).ratio(), 1.0);
        assert_eq!(ScrollSample::new(-40.0, 1500.0, 1000.0).ratio(), 0.0);
    }

    #[test]
    fn short_page_has_zero_ratio() {
        assert_eq!(ScrollSample::new(0.0, 800.0, 800.0).ratio(), 0.0);
        assert_eq!(ScrollSample::new(10.0, 600.0, 800.0).ratio(), 0.0);
    }

    #[test]
    fn static_sampler_snapshot() {
        let sampler = StaticSampler::new(120.0, 3000.0, Viewport::new(1280.0, 720.0));
        assert_eq!(sampler.sample(), ScrollSample::new(120.0, 3000.0, 720.0));
    }
}
