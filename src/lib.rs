//! Ray intersection core: the primitives a ray can hit, their hit tests and
//! their bounding boxes.

pub mod config;
pub mod error;
pub mod primitives;
pub mod ray;

pub use crate::{
    config::Tolerances,
    error::{ConfigError, GeometryError},
    primitives::{Aabb, Hittable, Primitive, PrimitiveList, Sphere, Triangle},
    ray::{HitRecord, MaterialHandle, Ray},
};
