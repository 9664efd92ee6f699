//! Scene description and driver
//!
//! A scene is an ordered list of shapes, each with a chain of transforms.
//! Shapes are drawn in list order; the last one drawn wins on overlap.

mod file;

pub use file::*;

use serde::{Serialize, Deserialize};

use crate::rasterizer::{
    draw_line, draw_point, draw_polygon, draw_rectangle, Axis, ColorIndex, Coordinates, Framebuffer,
    Line, Matrix3x3, Point, Polygon, Rectangle,
};

/// Anything the rasterizer can draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Point(Point),
    Line(Line),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Shape {
    pub fn draw(&self, fb: &mut Framebuffer) {
        match self {
            Shape::Point(p) => draw_point(fb, *p),
            Shape::Line(l) => draw_line(fb, *l),
            Shape::Rectangle(r) => draw_rectangle(fb, *r),
            Shape::Polygon(p) => draw_polygon(fb, p),
        }
    }

    /// Same geometry, different colors. Points and lines take `border`.
    pub fn recolored(&self, border: ColorIndex, fill: ColorIndex) -> Shape {
        match self {
            Shape::Point(p) => Shape::Point(Point { color: border, ..*p }),
            Shape::Line(l) => Shape::Line(Line { color: border, ..*l }),
            Shape::Rectangle(r) => Shape::Rectangle(Rectangle { border_color: border, fill_color: fill, ..*r }),
            Shape::Polygon(p) => Shape::Polygon(p.clone().with_colors(border, fill)),
        }
    }
}

/// One step of a transform chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Scale { x: f64, y: f64 },
    Rotate { degrees: f64, axis: Axis },
    Shear { x: f64, y: f64 },
}

impl Transform {
    pub fn matrix(&self) -> Matrix3x3 {
        match *self {
            Transform::Scale { x, y } => Matrix3x3::scale(x, y),
            Transform::Rotate { degrees, axis } => Matrix3x3::rotation(degrees, axis),
            Transform::Shear { x, y } => Matrix3x3::shear(x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneShape {
    pub shape: Shape,
    /// Applied first to last
    #[serde(default)]
    pub transforms: Vec<Transform>,
}

impl SceneShape {
    pub fn new(shape: Shape) -> Self {
        Self { shape, transforms: Vec::new() }
    }

    pub fn with(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// The shape with its transform chain applied.
    ///
    /// Rectangles stay axis-aligned, so only scales apply to them.
    pub fn resolve(&self) -> Shape {
        let mut shape = self.shape.clone();
        for t in &self.transforms {
            shape = match (shape, t) {
                (Shape::Polygon(p), t) => Shape::Polygon(p.transform(&t.matrix())),
                (Shape::Line(l), t) => Shape::Line(l.transform(&t.matrix())),
                (Shape::Rectangle(r), Transform::Scale { x, y }) => Shape::Rectangle(r.scale(*x, *y)),
                (Shape::Rectangle(r), other) => {
                    log::warn!("{:?} ignored for axis-aligned rectangle", other);
                    Shape::Rectangle(r)
                }
                (Shape::Point(p), _) => Shape::Point(p),
            };
        }
        shape
    }
}

/// Alternate one shape between two color pairs a few times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Index into `Scene::shapes`
    pub shape: usize,
    pub border_color: ColorIndex,
    pub fill_color: ColorIndex,
    #[serde(default = "default_cycles")]
    pub cycles: u32,
}

fn default_cycles() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    /// Clear color
    #[serde(default)]
    pub background: ColorIndex,
    pub shapes: Vec<SceneShape>,
    #[serde(default)]
    pub highlight: Option<Highlight>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: 0,
            shapes: Vec::new(),
            highlight: None,
        }
    }

    pub fn push(&mut self, shape: SceneShape) {
        self.shapes.push(shape);
    }

    /// Clear to the background and draw every shape in order
    pub fn render(&self, fb: &mut Framebuffer) {
        fb.clear(self.background);
        for shape in &self.shapes {
            shape.resolve().draw(fb);
        }
        log::debug!("scene '{}' rendered ({} shapes)", self.name, self.shapes.len());
    }

    /// Redraw one shape on top of the buffer, optionally recolored
    pub fn draw_shape(&self, index: usize, colors: Option<(ColorIndex, ColorIndex)>, fb: &mut Framebuffer) {
        let Some(entry) = self.shapes.get(index) else {
            log::warn!("scene '{}' has no shape {}", self.name, index);
            return;
        };
        let shape = entry.resolve();
        match colors {
            Some((border, fill)) => shape.recolored(border, fill).draw(fb),
            None => shape.draw(fb),
        }
    }

    /// Built-in scene: two mirrored quads and a tilted triangle between them
    pub fn demo() -> Self {
        let mut scene = Scene::new("demo");

        scene.push(SceneShape::new(Shape::Polygon(Polygon::new(
            vec![Coordinates::xy(10, 50), Coordinates::xy(140, 90), Coordinates::xy(140, 110), Coordinates::xy(10, 150)],
            0x33,
            0x33,
        ))));
        scene.push(SceneShape::new(Shape::Polygon(Polygon::new(
            vec![Coordinates::xy(310, 50), Coordinates::xy(180, 90), Coordinates::xy(180, 110), Coordinates::xy(310, 150)],
            0x33,
            0x33,
        ))));
        scene.push(
            SceneShape::new(Shape::Polygon(Polygon::new(
                vec![Coordinates::xy(160, 100), Coordinates::xy(100, 170), Coordinates::xy(220, 170)],
                0x28,
                14,
            )))
            .with(Transform::Scale { x: 0.5, y: 0.5 })
            .with(Transform::Rotate { degrees: 75.0, axis: Axis::X }),
        );

        scene.highlight = Some(Highlight {
            shape: 2,
            border_color: 255,
            fill_color: 255,
            cycles: 2,
        });
        scene
    }
}
