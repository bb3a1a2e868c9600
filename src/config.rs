// config.rs - Motion tuning
//
// Every numeric knob of the cube, bubble and splash motion. Defaults are the
// values the site ships with; a page can override any subset through JSON.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    // Falling phase
    pub fall_ease: f32,
    pub rotation_fall_gain: f32,
    pub settle_epsilon: f32,
    pub start_height: f32,

    // Settled phase
    pub scroll_velocity_scale: f32,
    pub scroll_ease: f32,
    pub spin_velocity_gain: f32,
    pub spin_smoothing: f32,
    pub final_scale_ratio: f32,

    // Rotation speeds, derived from one random draw per axis
    pub spin_range: f32,
    pub initial_spin_factor: f32,
    pub base_spin_factor: f32,

    /// Mesh scale is `size / scale_divisor`.
    pub scale_divisor: f32,

    pub bubble: BubbleConfig,
    pub splash: SplashConfig,
    pub layout: LayoutConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    /// Spawn probability per unit of remaining fall distance.
    pub fall_rate: f32,
    /// Spawn probability per unit of scroll velocity.
    pub scroll_rate: f32,
    pub life: f32,
    pub decay: f32,
    pub opacity_scale: f32,
    pub radius_min: f32,
    pub radius_range: f32,
    /// Full width of the horizontal/depth spawn jitter.
    pub jitter: f32,
    /// How far below the cube centre bubbles appear.
    pub drop: f32,
    pub drift: f32,
    pub rise_min: f32,
    pub rise_range: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    pub on_settle: bool,
    pub burst_count: usize,
    pub spread: f32,
    pub speed: f32,
    pub lift_min: f32,
    pub lift_range: f32,
    /// Multiplied by `speed` to get the per-tick vertical acceleration.
    pub gravity: f32,
    pub life_min: f32,
    pub life_range: f32,
    pub decay: f32,
    pub opacity_scale: f32,
    pub size_min: f32,
    pub size_range: f32,
    /// Full width of the random initial rotation, radians.
    pub tumble: f32,
    /// Draws above this value produce a box, the rest spheres.
    pub box_threshold: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub side_offset: f32,
    pub index_spread: f32,
    /// CSS pixels per world unit when mapping the viewport into the scene.
    pub pixels_per_unit: f32,
    pub rest_fraction: f32,
    pub bottom_fraction: f32,
    pub mobile_breakpoint: f32,
    pub mobile_depth: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            fall_ease: 0.05,
            rotation_fall_gain: 0.3,
            settle_epsilon: 0.25,
            start_height: 35.0,
            scroll_velocity_scale: 0.01,
            scroll_ease: 0.05,
            spin_velocity_gain: 2.0,
            spin_smoothing: 0.1,
            final_scale_ratio: 1.0,
            spin_range: 0.01,
            initial_spin_factor: 2.0,
            base_spin_factor: 0.15,
            scale_divisor: 3.0,
            bubble: BubbleConfig::default(),
            splash: SplashConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            fall_rate: 0.05,
            scroll_rate: 0.75,
            life: 2.0,
            decay: 0.01,
            opacity_scale: 0.3,
            radius_min: 0.05,
            radius_range: 0.2,
            jitter: 2.0,
            drop: 1.0,
            drift: 0.02,
            rise_min: 0.02,
            rise_range: 0.05,
        }
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            on_settle: true,
            burst_count: 20,
            spread: 0.15,
            speed: 0.3,
            lift_min: 0.5,
            lift_range: 0.3,
            gravity: -0.015,
            life_min: 0.5,
            life_range: 6.0,
            decay: 0.02,
            opacity_scale: 0.3,
            size_min: 0.1,
            size_range: 0.4,
            tumble: 3.0,
            box_threshold: 0.5,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            side_offset: 30.0,
            index_spread: 10.0,
            pixels_per_unit: 40.0,
            rest_fraction: 0.25,
            bottom_fraction: 0.85,
            mobile_breakpoint: 768.0,
            mobile_depth: 0.5,
        }
    }
}

impl MotionConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: MotionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or explode the motion: ease factors
    /// must lie in (0, 1] and particles must actually decay.
    pub fn validate(&self) -> Result<(), EngineError> {
        unit_interval("fall_ease", self.fall_ease)?;
        unit_interval("scroll_ease", self.scroll_ease)?;
        unit_interval("spin_smoothing", self.spin_smoothing)?;
        positive("settle_epsilon", self.settle_epsilon)?;
        positive("scale_divisor", self.scale_divisor)?;
        positive("bubble.decay", self.bubble.decay)?;
        positive("splash.decay", self.splash.decay)?;
        positive("layout.pixels_per_unit", self.layout.pixels_per_unit)?;
        if self.splash.burst_count == 0 {
            return Err(EngineError::OutOfRange {
                field: "splash.burst_count",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

fn unit_interval(field: &'static str, v: f32) -> Result<(), EngineError> {
    if v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(EngineError::OutOfRange { field, reason: "must be in (0, 1]" })
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), EngineError> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(EngineError::OutOfRange { field, reason: "must be positive" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MotionConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = MotionConfig::from_json(r#"{"fall_ease": 0.1, "splash": {"burst_count": 8}}"#).unwrap();
        assert_eq!(config.fall_ease, 0.1);
        assert_eq!(config.splash.burst_count, 8);
        assert_eq!(config.splash.decay, 0.02);
        assert_eq!(config.bubble, BubbleConfig::default());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = MotionConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn rejects_zero_decay() {
        let err = MotionConfig::from_json(r#"{"bubble": {"decay": 0.0}}"#).unwrap_err();
        match err {
            EngineError::OutOfRange { field, .. } => assert_eq!(field, "bubble.decay"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_ease_above_one() {
        let config = MotionConfig { fall_ease: 1.5, ..MotionConfig::default() };
        assert!(config.validate().is_err());
    }
}
