use glam::Vec3;

/// The ray data type
///
/// The direction does not have to be normalized, every intersection test
/// works in units of `direction`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// Index of a material in a scene-owned material table.
///
/// Primitives only carry it around so it can be stamped into a `HitRecord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u32);

impl MaterialHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Contains data to be used in the generation of a new ray as a result of an intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRecord {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub material: MaterialHandle,
}

impl HitRecord {
    #[inline]
    pub(crate) fn new(ray: &Ray, t: f32, normal: Vec3, material: MaterialHandle) -> Self {
        Self {
            t,
            point: ray.at(t),
            normal,
            material,
        }
    }
}
