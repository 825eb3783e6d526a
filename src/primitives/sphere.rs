use crate::{
    config::Tolerances,
    error::GeometryError,
    primitives::{Aabb, Hittable},
    ray::{HitRecord, MaterialHandle, Ray},
};
use glam::Vec3;
use log::{debug, trace};

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialHandle,
    bounds: Aabb,
}

impl Sphere {
    /// A negative radius is allowed and turns the reported normals inwards.
    pub fn new(center: Vec3, radius: f32, material: MaterialHandle) -> Result<Self, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::NonFiniteCenter(center.to_array()));
        }
        if !radius.is_finite() {
            return Err(GeometryError::NonFiniteRadius(radius));
        }
        if radius == 0.0 {
            return Err(GeometryError::ZeroRadius);
        }
        if radius < 0.0 {
            debug!(
                "Sphere at {:?} has negative radius {}, normals point inwards",
                center, radius
            );
        }

        let bounds = Aabb::around_sphere(center, radius);
        trace!("Built sphere at {:?} with radius {}", center, radius);

        Ok(Self {
            center,
            radius,
            material,
            bounds,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The first root strictly inside `(t_min, t_max)`, near root first
    #[inline]
    fn root(&self, ray: Ray, t_min: f32, t_max: f32, tolerances: &Tolerances) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - a * c;

        // Grazing rays miss
        if discriminant <= tolerances.sphere_discriminant_threshold {
            return None;
        }

        // A negative threshold admits discriminants just below zero, treat those as tangent
        let root = discriminant.max(0.0).sqrt();

        // Near root first, the far one is only valid if the ray starts inside
        let t = (-b - root) / a;
        if t_min < t && t < t_max {
            return Some(t);
        }

        let t = (-b + root) / a;
        if t_min < t && t < t_max {
            return Some(t);
        }

        None
    }
}

impl Hittable for Sphere {
    fn hit_with(
        &self,
        ray: Ray,
        t_min: f32,
        t_max: f32,
        tolerances: &Tolerances,
    ) -> Option<HitRecord> {
        self.root(ray, t_min, t_max, tolerances).map(|t| {
            let normal = (ray.at(t) - self.center) / self.radius;
            HitRecord::new(&ray, t, normal, self.material)
        })
    }

    fn occludes_with(&self, ray: Ray, t_min: f32, t_max: f32, tolerances: &Tolerances) -> bool {
        self.root(ray, t_min, t_max, tolerances).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    fn material(&self) -> MaterialHandle {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use glam::vec3;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, MaterialHandle(0)).unwrap()
    }

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(
            approx_eq!(f32, a.x, b.x, epsilon = 1e-5)
                && approx_eq!(f32, a.y, b.y, epsilon = 1e-5)
                && approx_eq!(f32, a.z, b.z, epsilon = 1e-5),
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn head_on_hit() {
        let ray = Ray::new(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let hit = unit_sphere().hit(ray, 0.0, f32::INFINITY).unwrap();

        assert!(approx_eq!(f32, hit.t, 4.0, epsilon = 1e-6));
        assert_vec_eq(hit.point, vec3(0.0, 0.0, -1.0));
        assert_vec_eq(hit.normal, vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn unnormalized_direction_hits_same_point() {
        let sphere = unit_sphere();
        let unit = Ray::new(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let long = Ray::new(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 4.0));

        let a = sphere.hit(unit, 0.0, f32::INFINITY).unwrap();
        let b = sphere.hit(long, 0.0, f32::INFINITY).unwrap();

        assert!(approx_eq!(f32, b.t, 1.0, epsilon = 1e-6));
        assert_vec_eq(a.point, b.point);
        assert_vec_eq(a.normal, b.normal);
    }

    #[test]
    fn normal_is_unit_length() {
        let sphere = Sphere::new(vec3(3.0, -1.0, 2.0), 2.5, MaterialHandle(0)).unwrap();
        let ray = Ray::new(vec3(0.0, 0.0, -10.0), vec3(0.3, -0.1, 1.2));
        let hit = sphere.hit(ray, 0.0, f32::INFINITY).unwrap();

        assert!(approx_eq!(f32, hit.normal.length(), 1.0, epsilon = 1e-5));
    }

    #[test]
    fn tangent_ray_misses() {
        // Touches the sphere at (1, 0, 0), discriminant is exactly zero
        let ray = Ray::new(vec3(1.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        assert_eq!(unit_sphere().hit(ray, f32::NEG_INFINITY, f32::INFINITY), None);
    }

    #[test]
    fn tangent_ray_hits_with_lowered_threshold() {
        let ray = Ray::new(vec3(1.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let tolerances = Tolerances {
            sphere_discriminant_threshold: -1e-6,
            ..Tolerances::DEFAULT
        };
        let hit = unit_sphere()
            .hit_with(ray, 0.0, f32::INFINITY, &tolerances)
            .unwrap();

        assert!(approx_eq!(f32, hit.t, 5.0, epsilon = 1e-5));
    }

    #[test]
    fn near_tangent_ray_hits_with_lowered_threshold() {
        // Discriminant is about -0.002, below zero but above the threshold
        let ray = Ray::new(vec3(1.001, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let tolerances = Tolerances {
            sphere_discriminant_threshold: -0.01,
            ..Tolerances::DEFAULT
        };
        let sphere = unit_sphere();

        assert_eq!(sphere.hit(ray, 0.0, f32::INFINITY), None);
        let hit = sphere
            .hit_with(ray, 0.0, f32::INFINITY, &tolerances)
            .unwrap();
        assert!(hit.t.is_finite());
        assert!(approx_eq!(f32, hit.t, 5.0, epsilon = 1e-4));
        assert_vec_eq(hit.point, vec3(1.001, 0.0, 0.0));
        assert!(sphere.occludes_with(ray, 0.0, f32::INFINITY, &tolerances));
    }

    #[test]
    fn record_is_built_from_ray_at_t() {
        let sphere = Sphere::new(vec3(0.5, -0.25, 2.0), 1.5, MaterialHandle(6)).unwrap();
        let ray = Ray::new(vec3(-2.0, 1.0, -3.0), vec3(0.4, -0.2, 1.0));
        let hit = sphere.hit(ray, 0.0, f32::INFINITY).unwrap();

        assert_eq!(hit.point, ray.at(hit.t));
        assert_eq!(hit.normal, (hit.point - sphere.center()) / sphere.radius());
        assert_eq!(hit.material, MaterialHandle(6));
    }

    #[test]
    fn clear_miss() {
        let ray = Ray::new(vec3(0.0, 3.0, -5.0), vec3(0.0, 0.0, 1.0));
        assert_eq!(unit_sphere().hit(ray, 0.0, f32::INFINITY), None);
    }

    #[test]
    fn origin_inside_reports_far_root() {
        let ray = Ray::new(Vec3::ZERO, vec3(1.0, 0.0, 0.0));
        let hit = unit_sphere().hit(ray, 0.0, f32::INFINITY).unwrap();

        assert!(approx_eq!(f32, hit.t, 1.0, epsilon = 1e-6));
        assert_vec_eq(hit.normal, vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn near_root_outside_interval_falls_back_to_far_root() {
        let ray = Ray::new(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let hit = unit_sphere().hit(ray, 4.5, f32::INFINITY).unwrap();

        assert!(approx_eq!(f32, hit.t, 6.0, epsilon = 1e-6));
        assert_vec_eq(hit.normal, vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn both_roots_outside_interval_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));

        // Roots at 4 and 6
        assert_eq!(sphere.hit(ray, 0.0, 3.5), None);
        assert_eq!(sphere.hit(ray, 6.5, 100.0), None);
        // Sphere behind the origin
        assert_eq!(sphere.hit(ray, -1.0, 0.0), None);
        let behind = Ray::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, 1.0));
        assert_eq!(sphere.hit(behind, 0.0, f32::INFINITY), None);
    }

    #[test]
    fn interval_bounds_are_exclusive() {
        let sphere = unit_sphere();
        let ray = Ray::new(vec3(0.0, 0.0, -2.0), vec3(0.0, 0.0, 1.0));

        // Roots are exactly 1 and 3
        assert_eq!(sphere.hit(ray, 1.0, 2.0), None);
        assert_eq!(sphere.hit(ray, 2.0, 3.0), None);
        assert_eq!(sphere.hit(ray, 1.0, 3.0), None);
    }

    #[test]
    fn origin_on_surface_pointing_outward() {
        let sphere = unit_sphere();
        let ray = Ray::new(vec3(0.0, 0.0, -1.0), vec3(0.0, 0.0, -1.0));

        // Roots are -2 and 0, the open interval starting at 0 excludes both
        assert_eq!(sphere.hit(ray, 0.0, f32::INFINITY), None);

        // Opening the interval below zero admits the t = 0 root
        let hit = sphere.hit(ray, -0.5, f32::INFINITY).unwrap();
        assert!(approx_eq!(f32, hit.t, 0.0, epsilon = 1e-6));
        assert_vec_eq(hit.point, vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn negative_radius_flips_normal() {
        let sphere = Sphere::new(Vec3::ZERO, -1.0, MaterialHandle(0)).unwrap();
        let ray = Ray::new(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let hit = sphere.hit(ray, 0.0, f32::INFINITY).unwrap();

        assert!(approx_eq!(f32, hit.t, 4.0, epsilon = 1e-6));
        assert_vec_eq(hit.normal, vec3(0.0, 0.0, 1.0));
        assert_eq!(sphere.bounding_box(), unit_sphere().bounding_box());
    }

    #[test]
    fn bounds_enclose_sphere() {
        let sphere = Sphere::new(vec3(1.0, 2.0, 3.0), 2.0, MaterialHandle(0)).unwrap();
        let bounds = sphere.bounding_box();

        assert_eq!(bounds.min(), vec3(-1.0, 0.0, 1.0));
        assert_eq!(bounds.max(), vec3(3.0, 4.0, 5.0));
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let sphere = Sphere::new(vec3(0.3, -0.2, 1.7), 0.9, MaterialHandle(2)).unwrap();
        let ray = Ray::new(vec3(-1.0, 0.5, -4.0), vec3(0.31, -0.17, 1.0));

        let first = sphere.hit(ray, 0.001, 1e9).unwrap();
        let second = sphere.hit(ray, 0.001, 1e9).unwrap();

        assert_eq!(first.t.to_bits(), second.t.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0, MaterialHandle(0)),
            Err(GeometryError::ZeroRadius)
        );
        assert!(matches!(
            Sphere::new(Vec3::ZERO, f32::NAN, MaterialHandle(0)),
            Err(GeometryError::NonFiniteRadius(_))
        ));
        assert!(matches!(
            Sphere::new(vec3(f32::INFINITY, 0.0, 0.0), 1.0, MaterialHandle(0)),
            Err(GeometryError::NonFiniteCenter(_))
        ));
    }
}
