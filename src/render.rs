// render.rs - Hand simulation state to the scene graph
//
// The world never draws. It reports object lifetime and per-frame poses to a
// `Renderer`; `Encoder` packs them into flat buffers the page reads after
// each tick.
//
// Buffers (rewritten every frame):
//   added_ids = u32 id per added object
//   added     = f32 pairs    [kind, size], parallel to added_ids
//   removed   = u32 ids
//   pose_ids  = u32 id per drawn object
//   poses     = POSE_STRIDE f32 per drawn object:
//               x y z  rx ry rz  scale  opacity  visible(0|1)

use std::collections::HashSet;

use glam::Vec3;

use crate::sim::{ObjectId, ObjectKind};

pub const POSE_STRIDE: usize = 9;

/// Everything the scene graph needs to place one object this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl Pose {
    /// Unrotated, unit-scale pose.
    pub fn plain(position: Vec3, opacity: f32, visible: bool) -> Self {
        Self { position, rotation: Vec3::ZERO, scale: 1.0, opacity, visible }
    }
}

pub trait Renderer {
    /// Start of a frame.
    fn begin(&mut self) {}
    fn add_object(&mut self, id: ObjectId, kind: ObjectKind, size: f32);
    fn remove_object(&mut self, id: ObjectId);
    fn draw(&mut self, id: ObjectId, pose: &Pose);
    /// End of a frame; every live object has been drawn.
    fn render(&mut self);
}

#[derive(Debug, Default)]
pub struct Encoder {
    added_ids: Vec<u32>,
    added: Vec<f32>,
    removed: Vec<u32>,
    pose_ids: Vec<u32>,
    poses: Vec<f32>,
    live: HashSet<ObjectId>,
    frames: u64,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added_ids_ptr(&self) -> *const u32 { self.added_ids.as_ptr() }
    pub fn added_ids_len(&self) -> usize { self.added_ids.len() }
    pub fn added_ptr(&self) -> *const f32 { self.added.as_ptr() }
    pub fn added_len(&self) -> usize { self.added.len() }
    pub fn removed_ptr(&self) -> *const u32 { self.removed.as_ptr() }
    pub fn removed_len(&self) -> usize { self.removed.len() }
    pub fn pose_ids_ptr(&self) -> *const u32 { self.pose_ids.as_ptr() }
    pub fn pose_ids_len(&self) -> usize { self.pose_ids.len() }
    pub fn poses_ptr(&self) -> *const f32 { self.poses.as_ptr() }
    pub fn poses_len(&self) -> usize { self.poses.len() }

    pub fn added_ids(&self) -> &[u32] { &self.added_ids }
    pub fn added(&self) -> &[f32] { &self.added }
    pub fn removed(&self) -> &[u32] { &self.removed }
    pub fn pose_ids(&self) -> &[u32] { &self.pose_ids }
    pub fn poses(&self) -> &[f32] { &self.poses }

    /// Objects currently in the scene.
    pub fn live_count(&self) -> usize { self.live.len() }
    pub fn frames(&self) -> u64 { self.frames }

    /// Decode this frame's additions.
    pub fn added_objects(&self) -> impl Iterator<Item = (u32, ObjectKind, f32)> + '_ {
        self.added_ids.iter().zip(self.added.chunks_exact(2)).filter_map(|(&id, c)| {
            let kind = match c[0] as u8 {
                0 => ObjectKind::Cube,
                1 => ObjectKind::Bubble,
                2 => ObjectKind::SplashBox,
                3 => ObjectKind::SplashSphere,
                _ => return None,
            };
            Some((id, kind, c[1]))
        })
    }

    /// Pose record for object `id` this frame.
    pub fn pose_of(&self, id: ObjectId) -> Option<&[f32]> {
        let i = self.pose_ids.iter().position(|&p| p == id.0)?;
        self.poses.get(i * POSE_STRIDE..(i + 1) * POSE_STRIDE)
    }
}

impl Renderer for Encoder {
    fn begin(&mut self) {
        self.added_ids.clear();
        self.added.clear();
        self.removed.clear();
        self.pose_ids.clear();
        self.poses.clear();
    }

    fn add_object(&mut self, id: ObjectId, kind: ObjectKind, size: f32) {
        self.live.insert(id);
        self.added_ids.push(id.0);
        self.added.extend_from_slice(&[kind as u8 as f32, size]);
    }

    fn remove_object(&mut self, id: ObjectId) {
        if self.live.remove(&id) {
            self.removed.push(id.0);
        } else {
            log::warn!("remove of unknown object {}", id.0);
        }
    }

    fn draw(&mut self, id: ObjectId, pose: &Pose) {
        if !self.live.contains(&id) {
            log::warn!("draw of unknown object {}", id.0);
            return;
        }
        let p = pose.position;
        let r = pose.rotation;
        self.pose_ids.push(id.0);
        self.poses.extend_from_slice(&[
            p.x, p.y, p.z,
            r.x, r.y, r.z,
            pose.scale,
            pose.opacity,
            if pose.visible { 1.0 } else { 0.0 },
        ]);
    }

    fn render(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_one_frame() {
        let mut enc = Encoder::new();
        enc.begin();
        enc.add_object(ObjectId(7), ObjectKind::Bubble, 0.2);
        enc.draw(ObjectId(7), &Pose::plain(Vec3::new(1.0, 2.0, 3.0), 0.5, true));
        enc.render();

        assert_eq!(enc.added_ids(), &[7]);
        assert_eq!(enc.added(), &[1.0, 0.2]);
        assert_eq!(enc.pose_ids(), &[7]);
        assert_eq!(enc.pose_of(ObjectId(7)).unwrap(), &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0, 0.5, 1.0]);
        assert_eq!(enc.frames(), 1);
    }

    #[test]
    fn next_frame_starts_clean() {
        let mut enc = Encoder::new();
        enc.begin();
        enc.add_object(ObjectId(1), ObjectKind::Cube, 3.0);
        enc.render();

        enc.begin();
        enc.remove_object(ObjectId(1));
        enc.render();
        assert!(enc.added().is_empty());
        assert!(enc.added_ids().is_empty());
        assert_eq!(enc.removed(), &[1]);
        assert_eq!(enc.live_count(), 0);
    }

    #[test]
    fn ignores_unknown_objects() {
        let mut enc = Encoder::new();
        enc.begin();
        enc.draw(ObjectId(3), &Pose::plain(Vec3::ZERO, 1.0, true));
        enc.remove_object(ObjectId(3));
        assert!(enc.poses().is_empty());
        assert!(enc.removed().is_empty());
    }

    #[test]
    fn decodes_additions() {
        let mut enc = Encoder::new();
        enc.add_object(ObjectId(2), ObjectKind::SplashSphere, 0.3);
        let added: Vec<_> = enc.added_objects().collect();
        assert_eq!(added, vec![(2, ObjectKind::SplashSphere, 0.3)]);
    }

    #[test]
    fn ids_past_f32_precision_stay_exact() {
        let mut enc = Encoder::new();
        enc.begin();
        let id = ObjectId((1 << 24) + 1);
        enc.add_object(id, ObjectKind::Bubble, 0.1);
        enc.draw(id, &Pose::plain(Vec3::ZERO, 1.0, true));

        let added: Vec<_> = enc.added_objects().collect();
        assert_eq!(added, vec![(id.0, ObjectKind::Bubble, 0.1)]);
        assert_eq!(enc.added_ids(), enc.pose_ids());
    }
}
