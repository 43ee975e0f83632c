//! Constructors and text form for `ShapeMessage`.
//!
//! The text form is `<kind>=<dim>[,<dim>...]`, e.g. `square=3` or `triangle=3,4,5`.
//! Dimensions are taken as-is; no positivity check is made here.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use crate::proto::shape_message::Shape;
use crate::proto::{Circle, Parallelogram, Rectangle, ShapeMessage, Square, Triangle};

impl ShapeMessage {
    #[must_use]
    pub fn square(edge_length: f32) -> Self {
        Self::from(Shape::Square(Square { edge_length }))
    }

    #[must_use]
    pub fn rectangle(length: f32, width: f32) -> Self {
        Self::from(Shape::Rectangle(Rectangle { length, width }))
    }

    #[must_use]
    pub fn circle(radius: f32) -> Self {
        Self::from(Shape::Circle(Circle { radius }))
    }

    #[must_use]
    pub fn triangle(edge_a: f32, edge_b: f32, edge_c: f32) -> Self {
        Self::from(Shape::Triangle(Triangle {
            edge_a,
            edge_b,
            edge_c,
        }))
    }

    #[must_use]
    pub fn parallelogram(base_length: f32, height: f32) -> Self {
        Self::from(Shape::Parallelogram(Parallelogram {
            base_length,
            height,
        }))
    }

    /// Name of the populated variant, or `None` when no variant known to this build is set.
    #[must_use]
    pub fn kind(&self) -> Option<&'static str> {
        self.shape.as_ref().map(|shape| match shape {
            Shape::Square(_) => "square",
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Triangle(_) => "triangle",
            Shape::Parallelogram(_) => "parallelogram",
        })
    }
}

impl From<Shape> for ShapeMessage {
    fn from(shape: Shape) -> Self {
        Self { shape: Some(shape) }
    }
}

/// Error returned when a shape's text form cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeParseError {
    #[error("missing '=' in '{0}', expected <kind>=<dimensions>")]
    MissingSeparator(String),

    #[error("unknown shape kind '{0}'")]
    UnknownKind(String),

    #[error("{kind} takes {expected} dimension(s), got {actual}")]
    Arity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid dimension '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

impl FromStr for ShapeMessage {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, raw) = s
            .split_once('=')
            .ok_or_else(|| ShapeParseError::MissingSeparator(s.to_owned()))?;

        match kind.trim().to_ascii_lowercase().as_str() {
            "square" => {
                let [edge] = dimensions("square", raw)?;
                Ok(Self::square(edge))
            }
            "rectangle" => {
                let [length, width] = dimensions("rectangle", raw)?;
                Ok(Self::rectangle(length, width))
            }
            "circle" => {
                let [radius] = dimensions("circle", raw)?;
                Ok(Self::circle(radius))
            }
            "triangle" => {
                let [a, b, c] = dimensions("triangle", raw)?;
                Ok(Self::triangle(a, b, c))
            }
            "parallelogram" => {
                let [base, height] = dimensions("parallelogram", raw)?;
                Ok(Self::parallelogram(base, height))
            }
            other => Err(ShapeParseError::UnknownKind(other.to_owned())),
        }
    }
}

fn dimensions<const N: usize>(kind: &'static str, raw: &str) -> Result<[f32; N], ShapeParseError> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(ShapeParseError::Arity {
            kind,
            expected: N,
            actual: parts.len(),
        });
    }

    let mut dims = [0.0_f32; N];
    for (slot, part) in dims.iter_mut().zip(parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|source| ShapeParseError::InvalidNumber {
                value: part.to_owned(),
                source,
            })?;
    }
    Ok(dims)
}

impl fmt::Display for ShapeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            Some(Shape::Square(s)) => write!(f, "square={}", s.edge_length),
            Some(Shape::Rectangle(r)) => write!(f, "rectangle={},{}", r.length, r.width),
            Some(Shape::Circle(c)) => write!(f, "circle={}", c.radius),
            Some(Shape::Triangle(t)) => {
                write!(f, "triangle={},{},{}", t.edge_a, t.edge_b, t.edge_c)
            }
            Some(Shape::Parallelogram(p)) => {
                write!(f, "parallelogram={},{}", p.base_length, p.height)
            }
            None => f.write_str("<unrecognized>"),
        }
    }
}
