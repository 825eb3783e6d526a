//! This module is full of primitives that all impl Hittable

mod aabb;
mod list;
mod sphere;
mod triangle;

pub use aabb::*;
pub use list::*;
pub use sphere::*;
pub use triangle::*;

use crate::{
    config::Tolerances,
    ray::{HitRecord, MaterialHandle, Ray},
};
use enum_dispatch::enum_dispatch;

/// Computes whether a ray intersects a primitive
///
/// Only hits strictly inside `(t_min, t_max)` are reported. Picking the
/// closest hit among several primitives is up to the caller, see
/// [`PrimitiveList`].
#[enum_dispatch]
pub trait Hittable: Send + Sync {
    /// Intersect using explicit numeric thresholds
    fn hit_with(&self, ray: Ray, t_min: f32, t_max: f32, tolerances: &Tolerances)
        -> Option<HitRecord>;

    /// Intersect using `Tolerances::DEFAULT`
    fn hit(&self, ray: Ray, t_min: f32, t_max: f32) -> Option<HitRecord> {
        self.hit_with(ray, t_min, t_max, &Tolerances::DEFAULT)
    }

    /// Whether anything is hit inside the interval, for shadow rays.
    /// Stops at the first valid `t` and never builds a `HitRecord`.
    fn occludes_with(&self, ray: Ray, t_min: f32, t_max: f32, tolerances: &Tolerances) -> bool;

    /// `occludes_with` using `Tolerances::DEFAULT`
    fn occludes(&self, ray: Ray, t_min: f32, t_max: f32) -> bool {
        self.occludes_with(ray, t_min, t_max, &Tolerances::DEFAULT)
    }

    /// The bounds computed when the primitive was built
    fn bounding_box(&self) -> Aabb;

    fn material(&self) -> MaterialHandle;
}

/// Every kind of geometry a ray can hit.
///
/// Dispatch is a plain `match`, no vtables, so adding a variant makes the
/// compiler point at every place that has to handle it.
#[enum_dispatch(Hittable)]
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Sphere,
    Triangle,
}
