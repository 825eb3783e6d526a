use crate::{
    config::Tolerances,
    error::GeometryError,
    primitives::{Aabb, Hittable},
    ray::{HitRecord, MaterialHandle, Ray},
};
use glam::Vec3;
use log::trace;

/// A flat shaded triangle.
///
/// The face normal follows the winding of the vertices: it points towards
/// the side from which `a -> b -> c` is seen counter-clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    normal: Vec3,
    material: MaterialHandle,
    bounds: Aabb,
}

impl Triangle {
    /// Collinear vertices are rejected here rather than left to the parallel check.
    /// So are vertices so far apart that the face normal overflows `f32`.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: MaterialHandle) -> Result<Self, GeometryError> {
        for (index, vertex) in [a, b, c].iter().enumerate() {
            if !vertex.is_finite() {
                return Err(GeometryError::NonFiniteVertex {
                    index,
                    value: vertex.to_array(),
                });
            }
        }

        let cross = (b - a).cross(c - a);
        if !cross.is_finite() {
            return Err(GeometryError::NormalOverflow);
        }
        // Scale first so the squared length of a large but finite normal cannot overflow
        let normal = (cross / cross.abs().max_element())
            .try_normalize()
            .ok_or(GeometryError::DegenerateTriangle)?;
        let bounds = Aabb::around_points(a, b, c);
        trace!("Built triangle {:?} {:?} {:?}", a, b, c);

        Ok(Self {
            a,
            b,
            c,
            normal,
            material,
            bounds,
        })
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Triangle {
    // Möller–Trumbore, cheapest rejections first
    #[inline]
    fn distance(&self, ray: Ray, t_min: f32, t_max: f32, tolerances: &Tolerances) -> Option<f32> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Parallel to the triangle
        if a.abs() < tolerances.triangle_parallel_epsilon {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.a;
        let u = f * s.dot(h);
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t_min < t && t < t_max {
            Some(t)
        } else {
            None
        }
    }
}

impl Hittable for Triangle {
    fn hit_with(
        &self,
        ray: Ray,
        t_min: f32,
        t_max: f32,
        tolerances: &Tolerances,
    ) -> Option<HitRecord> {
        self.distance(ray, t_min, t_max, tolerances)
            .map(|t| HitRecord::new(&ray, t, self.normal, self.material))
    }

    fn occludes_with(&self, ray: Ray, t_min: f32, t_max: f32, tolerances: &Tolerances) -> bool {
        self.distance(ray, t_min, t_max, tolerances).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    fn material(&self) -> MaterialHandle {
        self.material
    }
}
