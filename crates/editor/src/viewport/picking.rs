use glam::{Mat4, Vec3};

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// World-space bounds of a `size` box centered at the origin of `transform`
    pub fn from_box(size: Vec3, transform: Mat4) -> Self {
        let h = size * 0.5;
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let p = transform.transform_point3(Vec3::new(sx * h.x, sy * h.y, sz * h.z));
                    min = min.min(p);
                    max = max.max(p);
                }
            }
        }
        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax || tmin.is_nan() {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// All candidates hit by the ray, nearest first.
pub fn pick_all<'a, I>(ray: &Ray, candidates: I) -> Vec<(&'a str, f32)>
where
    I: IntoIterator<Item = (&'a str, Aabb)>,
{
    let mut hits: Vec<(&str, f32)> = candidates
        .into_iter()
        .filter_map(|(id, aabb)| ray_aabb(ray, &aabb).map(|d| (id, d)))
        .collect();
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits
}

/// Pick the nearest candidate whose AABB is intersected by the ray.
pub fn pick_nearest<'a, I>(ray: &Ray, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, Aabb)>,
{
    pick_all(ray, candidates).first().map(|(id, _)| *id)
}

/// Intersect a ray with the horizontal plane `y = height`.
/// Returns None if the ray is parallel to the plane or the hit is behind it.
pub fn ray_horizontal_plane(ray: &Ray, height: f32) -> Option<Vec3> {
    let denom = ray.direction.y;
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (height - ray.origin.y) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}
