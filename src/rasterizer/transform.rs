//! Geometry operations: centroids and scale/rotate/shear for each shape kind
//!
//! Polygons keep their vertices and accumulate a matrix. Lines and
//! rectangles have no stored transform and are changed eagerly.

use super::math::{apply, from_pivot, round_coord, Axis, Matrix, Matrix3x3};
use super::types::{Coordinates, Line, Polygon, Rectangle};

impl Polygon {
    /// Arithmetic mean of the vertices, rounded per component
    pub fn centroid(&self) -> Coordinates {
        if self.vertices.is_empty() {
            return Coordinates::ZERO;
        }
        let n = self.vertices.len() as f64;
        let (sx, sy, sz) = self.vertices.iter().fold((0i64, 0i64, 0i64), |acc, v| {
            (acc.0 + v.x as i64, acc.1 + v.y as i64, acc.2 + v.z as i64)
        });
        Coordinates {
            x: round_coord(sx as f64 / n),
            y: round_coord(sy as f64 / n),
            z: round_coord(sz as f64 / n),
        }
    }

    /// Compose `m` after whatever transform is already pending
    pub fn transform(mut self, m: &Matrix3x3) -> Self {
        self.transformation = m.compose(&self.transformation);
        self
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self.transform(&Matrix3x3::scale(sx, sy))
    }

    pub fn rotate(self, degrees: f64, axis: Axis) -> Self {
        self.transform(&Matrix3x3::rotation(degrees, axis))
    }

    pub fn shear(self, shx: f64, shy: f64) -> Self {
        self.transform(&Matrix3x3::shear(shx, shy))
    }

    /// Vertices with the pending transform applied about the centroid.
    ///
    /// Computed in one batch; the stored vertices are left alone.
    pub fn transformed_vertices(&self) -> Vec<Coordinates> {
        if self.transformation.is_identity() {
            return self.vertices.clone();
        }
        let origin = self.centroid();
        let relative = Matrix::from_columns(self.vertices.iter().map(|v| v.relative_to(origin)));
        let moved = Matrix::from(self.transformation).product(&relative);

        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| if *v == origin { *v } else { from_pivot(moved.column3(i), origin) })
            .collect()
    }
}

impl Line {
    /// Scale `b` relative to `a`
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self.transform(&Matrix3x3::scale(sx, sy))
    }

    /// Rotate `b` around `a`
    pub fn rotate(self, degrees: f64, axis: Axis) -> Self {
        self.transform(&Matrix3x3::rotation(degrees, axis))
    }

    pub fn shear(self, shx: f64, shy: f64) -> Self {
        self.transform(&Matrix3x3::shear(shx, shy))
    }

    pub fn transform(self, m: &Matrix3x3) -> Self {
        Line {
            a: self.a,
            b: apply(self.b, self.a, m),
            color: self.color,
        }
    }
}

/// Mirror one axis: a negative extent becomes a positive one ending at
/// the old offset.
fn normalize_axis(offset: i32, extent: i32) -> (i32, i32) {
    if extent >= 0 {
        return (offset, extent);
    }
    let new_offset = clamp_i32(offset as i64 + extent as i64);
    (new_offset, clamp_i32(offset as i64 - new_offset as i64))
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Rectangle {
    /// Scale the signed dimensions. The offset is kept, so a negative
    /// factor flips the footprint across the offset edge (see
    /// [`Rectangle::normalized`]) and a second flip restores it.
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Rectangle {
            dimensions: Coordinates {
                x: round_coord(self.dimensions.x as f64 * sx),
                y: round_coord(self.dimensions.y as f64 * sy),
                z: self.dimensions.z,
            },
            ..self
        }
    }

    /// The same footprint with non-negative dimensions, per axis
    pub fn normalized(&self) -> Self {
        let (ox, dx) = normalize_axis(self.offset.x, self.dimensions.x);
        let (oy, dy) = normalize_axis(self.offset.y, self.dimensions.y);
        Rectangle {
            offset: Coordinates::new(ox, oy, self.offset.z),
            dimensions: Coordinates::new(dx, dy, self.dimensions.z),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(
            vec![Coordinates::xy(160, 100), Coordinates::xy(100, 170), Coordinates::xy(220, 170)],
            0x28,
            14,
        )
    }

    #[test]
    fn test_centroid_rounds() {
        let p = Polygon::new(
            vec![Coordinates::xy(0, 0), Coordinates::xy(10, 0), Coordinates::xy(5, 10)],
            1,
            1,
        );
        assert_eq!(p.centroid(), Coordinates::xy(5, 3));
        assert_eq!(triangle().centroid(), Coordinates::xy(160, 147));
    }

    #[test]
    fn test_clone_isolation() {
        let original = triangle();
        let rotated = original.clone().rotate(45.0, Axis::Z);
        assert!(original.transformation.is_identity());
        assert!(!rotated.transformation.is_identity());
        assert_eq!(original.vertices, rotated.vertices);
    }

    #[test]
    fn test_full_turn_returns_vertices() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let p = triangle().rotate(360.0, axis);
            assert_eq!(p.transformed_vertices(), p.vertices);
            let p = triangle().rotate(120.0, axis).rotate(240.0, axis).rotate(720.0, axis);
            assert_eq!(p.transformed_vertices(), p.vertices);
        }
    }

    #[test]
    fn test_scale_about_centroid() {
        let p = Polygon::new(
            vec![Coordinates::xy(0, 0), Coordinates::xy(10, 0), Coordinates::xy(10, 10), Coordinates::xy(0, 10)],
            1,
            0,
        )
        .scale(0.5, 0.5);
        assert_eq!(
            p.transformed_vertices(),
            vec![Coordinates::xy(3, 3), Coordinates::xy(8, 3), Coordinates::xy(8, 8), Coordinates::xy(3, 8)]
        );
    }

    #[test]
    fn test_transform_order_is_composition_order() {
        let square = Polygon::new(
            vec![Coordinates::xy(-10, -10), Coordinates::xy(10, -10), Coordinates::xy(10, 10), Coordinates::xy(-10, 10)],
            1,
            0,
        );
        let scale_then_rotate = square.clone().scale(2.0, 1.0).rotate(90.0, Axis::Z);
        let rotate_then_scale = square.clone().rotate(90.0, Axis::Z).scale(2.0, 1.0);
        // stretched along x then turned: tall
        assert_eq!(scale_then_rotate.transformed_vertices()[0], Coordinates::xy(10, -20));
        // turned then stretched: wide
        assert_eq!(rotate_then_scale.transformed_vertices()[0], Coordinates::xy(20, -10));
    }

    #[test]
    fn test_batched_vertices_match_apply() {
        let p = triangle().scale(0.5, 0.7).rotate(75.0, Axis::X).shear(0.3, -0.1);
        let origin = p.centroid();
        let one_by_one: Vec<Coordinates> = p
            .vertices
            .iter()
            .map(|v| apply(*v, origin, &p.transformation))
            .collect();
        assert_eq!(p.transformed_vertices(), one_by_one);
    }

    #[test]
    fn test_line_rotate_about_a() {
        let l = Line::new(Coordinates::xy(10, 10), Coordinates::xy(20, 10), 3).rotate(90.0, Axis::Z);
        assert_eq!(l.a, Coordinates::xy(10, 10));
        assert_eq!(l.b, Coordinates::xy(10, 20));
        let l = Line::new(Coordinates::xy(0, 0), Coordinates::xy(4, 4), 3).scale(2.0, 0.5);
        assert_eq!(l.b, Coordinates::xy(8, 2));
        let l = Line::new(Coordinates::xy(0, 0), Coordinates::xy(0, 10), 3).shear(0.5, 0.0);
        assert_eq!(l.b, Coordinates::xy(5, 10));
    }

    #[test]
    fn test_rectangle_mirror_round_trip() {
        let rect = Rectangle::new(Coordinates::xy(10, 20), Coordinates::xy(30, 40), 1, 2);
        let mirrored = rect.scale(-1.0, -1.0);
        let n = mirrored.normalized();
        assert_eq!(n.offset, Coordinates::xy(-20, -20));
        assert_eq!(n.dimensions, Coordinates::xy(30, 40));
        let back = mirrored.scale(-1.0, -1.0);
        assert_eq!(back.offset, rect.offset);
        assert_eq!(back.dimensions, rect.dimensions);
    }

    #[test]
    fn test_rectangle_mirror_single_axis() {
        let rect = Rectangle::new(Coordinates::xy(50, 50), Coordinates::xy(10, 10), 1, 0);
        let n = rect.scale(-2.0, 1.0).normalized();
        assert_eq!(n.offset, Coordinates::xy(30, 50));
        assert_eq!(n.dimensions, Coordinates::xy(20, 10));
    }

    #[test]
    fn test_rectangle_normalize_clamps_extreme_offsets() {
        let rect = Rectangle::new(
            Coordinates::xy(-2_000_000_000, 0),
            Coordinates::xy(-2_000_000_000, 10),
            1,
            0,
        );
        let n = rect.normalized();
        assert_eq!(n.offset.x, i32::MIN);
        assert_eq!(n.dimensions.x, -2_000_000_000 - i32::MIN);
        assert_eq!(n.dimensions.y, 10);
    }
}
