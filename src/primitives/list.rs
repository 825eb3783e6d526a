use crate::{
    config::Tolerances,
    primitives::{Aabb, Hittable, Primitive},
    ray::{HitRecord, Ray},
};
use rayon::prelude::*;

/// A flat list of primitives tested one after another.
///
/// No acceleration at all. This is what a traversal does once it reaches a
/// leaf: keep narrowing `t_max` to the closest hit found so far.
#[derive(Clone, Debug, Default)]
pub struct PrimitiveList {
    primitives: Vec<Primitive>,
}

impl PrimitiveList {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    /// Bounds of every primitive in the list, `None` when it is empty
    pub fn bounds(&self) -> Option<Aabb> {
        self.primitives
            .iter()
            .map(|p| p.bounding_box())
            .reduce(Aabb::union)
    }

    pub fn closest_hit(&self, ray: Ray, t_min: f32, t_max: f32) -> Option<HitRecord> {
        self.closest_hit_with(ray, t_min, t_max, &Tolerances::DEFAULT)
    }

    pub fn closest_hit_with(
        &self,
        ray: Ray,
        t_min: f32,
        t_max: f32,
        tolerances: &Tolerances,
    ) -> Option<HitRecord> {
        let mut hit = None;
        let mut closest = t_max;

        // Find the closest intersection
        for primitive in &self.primitives {
            if let Some(h) = primitive.hit_with(ray, t_min, closest, tolerances) {
                closest = h.t;
                hit = Some(h);
            }
        }

        hit
    }

    pub fn any_hit(&self, ray: Ray, t_min: f32, t_max: f32) -> bool {
        self.any_hit_with(ray, t_min, t_max, &Tolerances::DEFAULT)
    }

    pub fn any_hit_with(&self, ray: Ray, t_min: f32, t_max: f32, tolerances: &Tolerances) -> bool {
        self.primitives
            .iter()
            .any(|p| p.occludes_with(ray, t_min, t_max, tolerances))
    }

    /// Closest hit for each ray, evaluated in parallel. Results keep the order of `rays`.
    pub fn closest_hits(
        &self,
        rays: &[Ray],
        t_min: f32,
        t_max: f32,
        tolerances: &Tolerances,
    ) -> Vec<Option<HitRecord>> {
        rays.par_iter()
            .map(|&ray| self.closest_hit_with(ray, t_min, t_max, tolerances))
            .collect()
    }
}

impl From<Vec<Primitive>> for PrimitiveList {
    fn from(primitives: Vec<Primitive>) -> Self {
        Self::new(primitives)
    }
}
