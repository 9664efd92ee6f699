//! Core shape types for the rasterizer

use serde::{Serialize, Deserialize};

use super::math::Matrix3x3;

/// Palette index. 0 is treated as transparent by every shape.
pub type ColorIndex = u8;

pub const TRANSPARENT: ColorIndex = 0;

/// A vertex in a shape-local frame.
/// z only takes part in centroids and X/Y-axis rotation, never in addressing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl Coordinates {
    pub const ZERO: Coordinates = Coordinates { x: 0, y: 0, z: 0 };

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn xy(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// `self - origin`, widened so extreme coordinates cannot overflow
    pub fn relative_to(self, origin: Coordinates) -> [f64; 3] {
        [
            self.x as f64 - origin.x as f64,
            self.y as f64 - origin.y as f64,
            self.z as f64 - origin.z as f64,
        ]
    }
}

/// A single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub coordinates: Coordinates,
    pub color: ColorIndex,
}

impl Point {
    pub fn new(coordinates: Coordinates, color: ColorIndex) -> Self {
        Self { coordinates, color }
    }
}

/// Directed segment in screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub a: Coordinates,
    pub b: Coordinates,
    pub color: ColorIndex,
}

impl Line {
    pub fn new(a: Coordinates, b: Coordinates, color: ColorIndex) -> Self {
        Self { a, b, color }
    }

    /// Same segment, walked the other way
    pub fn reversed(self) -> Self {
        Self { a: self.b, b: self.a, color: self.color }
    }
}

/// Axis-aligned rectangle.
///
/// `dimensions` may be negative after a mirroring scale; see
/// [`Rectangle::normalized`] for the footprint it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub offset: Coordinates,
    pub dimensions: Coordinates,
    #[serde(default)]
    pub border_color: ColorIndex,
    #[serde(default)]
    pub fill_color: ColorIndex,
}

impl Rectangle {
    pub fn new(offset: Coordinates, dimensions: Coordinates, border_color: ColorIndex, fill_color: ColorIndex) -> Self {
        Self { offset, dimensions, border_color, fill_color }
    }
}

/// Closed polygon with a pending transform.
///
/// Vertices stay in the local frame; `transformation` is applied about the
/// centroid at draw time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Coordinates>,
    #[serde(default)]
    pub border_color: ColorIndex,
    #[serde(default)]
    pub fill_color: ColorIndex,
    #[serde(default)]
    pub transformation: Matrix3x3,
}

impl Polygon {
    pub fn new(vertices: Vec<Coordinates>, border_color: ColorIndex, fill_color: ColorIndex) -> Self {
        Self {
            vertices,
            border_color,
            fill_color,
            transformation: Matrix3x3::IDENTITY,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fewer than three vertices never draws anything
    pub fn is_drawable(&self) -> bool {
        self.vertices.len() >= 3
    }

    pub fn with_colors(mut self, border_color: ColorIndex, fill_color: ColorIndex) -> Self {
        self.border_color = border_color;
        self.fill_color = fill_color;
        self
    }
}
