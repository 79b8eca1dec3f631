use anyhow::{anyhow, Result};

use crate::error::TraceError;

use std::cmp::Ordering;

/// Important to note that this is a point in continuous coordinates. It only becomes a `Pixel`
/// when emitted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn squared_distance(&self, other: Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.squared_distance(other).sqrt()
    }

    pub fn round(&self) -> Pixel {
        Pixel {
            x: self.x.round() as i64,
            y: self.y.round() as i64,
        }
    }
}

/// Integer raster coordinates, relative to the surface origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: i64,
    pub y: i64,
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Point {
        Point::new(x as f64, y as f64)
    }
}

/// Integer endpoints of a line. The tracers expect `x0 < x1`; `ordered()` is how callers get
/// there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl Segment {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Segment {
        Segment { x0, y0, x1, y1 }
    }

    /// Swaps the endpoints if needed so the segment goes left to right.
    pub fn ordered(self) -> Segment {
        if self.x0 > self.x1 {
            Segment::new(self.x1, self.y1, self.x0, self.y0)
        } else {
            self
        }
    }

    /// Rejects vertical and right-to-left segments.
    pub fn check(&self) -> Result<(), TraceError> {
        match self.x0.cmp(&self.x1) {
            Ordering::Equal => Err(TraceError::DegenerateGeometry { x: self.x0 }),
            Ordering::Greater => Err(TraceError::UnorderedEndpoints {
                x1: self.x0,
                x2: self.x1,
            }),
            Ordering::Less => Ok(()),
        }
    }

    pub fn start(&self) -> Point {
        Point::from((self.x0, self.y0))
    }
    pub fn end(&self) -> Point {
        Point::from((self.x1, self.y1))
    }

    /// Slope of the segment, as a real division. The differences are taken in f64 so the full
    /// i64 range can't overflow.
    pub fn slope(&self) -> f64 {
        (self.y1 as f64 - self.y0 as f64) / (self.x1 as f64 - self.x0 as f64)
    }

    /// Direction of the segment measured from the x axis, in (-π/2, π/2) for checked segments.
    pub fn angle(&self) -> f64 {
        self.slope().atan()
    }
}

fn check_ranges<N: PartialOrd + ToString>(values: Vec<N>, min: N, max: N) -> Result<()> {
    let mut wrong_vals = values.iter().filter(|v| **v < min || **v > max).peekable();
    if wrong_vals.peek().is_some() {
        Err(anyhow!(
            "Values for {} type given outside the [{}, {}] range. The following were the erroneous values:{}",
            std::any::type_name::<N>(),
            min.to_string(),
            max.to_string(),
            wrong_vals.fold(String::from(""), |acc, v| acc + " " + &v.to_string())
        ))
    } else {
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

fn is_hex_format(hex: &str) -> bool {
    hex.starts_with('#') && hex.len() == 7 && hex[1..].chars().all(|d| d.is_ascii_hexdigit())
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Result<Color> {
        check_ranges(vec![r, g, b], 0.0, 1.0)?;
        Ok(Color { r, g, b })
    }

    pub fn from_hex(hex: &str) -> Result<Color> {
        if is_hex_format(hex) {
            Color::new(
                u8::from_str_radix(&hex[1..=2], 16)? as f32 / 255.0,
                u8::from_str_radix(&hex[3..=4], 16)? as f32 / 255.0,
                u8::from_str_radix(&hex[5..=6], 16)? as f32 / 255.0,
            )
        } else {
            Err(anyhow!(
                "from_hex() called on a string that isn't a '#rrggbb' hexadecimal color: '{}'",
                hex
            ))
        }
    }

    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (c * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}
