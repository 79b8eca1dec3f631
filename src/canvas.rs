//! Contains the `Surface` trait, the only thing the tracers know about drawing, and `Canvas`,
//! an in-memory raster that implements it and can be exported to SVG.
use anyhow::{Context, Result};
use log::debug;
use svg::node::element::Rectangle;
use svg::Document;

use std::path::Path;

use crate::shapes::{Color, Pixel};

/// Anything pixels can be emitted to. Implementations decide what happens with pixels outside
/// of their bounds; the tracers never check.
pub trait Surface {
    fn emit(&mut self, x: i64, y: i64, color: Color);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn emit(&mut self, x: i64, y: i64, color: Color) {
        (**self).emit(x, y, color)
    }
}

/// Records every emission, in order, without any bounds.
impl Surface for Vec<(Pixel, Color)> {
    fn emit(&mut self, x: i64, y: i64, color: Color) {
        self.push((Pixel { x, y }, color));
    }
}

pub struct Canvas {
    width: u32,
    height: u32,

    /// Row major, `None` means the background shows through.
    pixels: Vec<Option<Color>>,

    background_color: Color,

    /// Emissions that fell outside of the canvas
    discarded: usize,
}

impl Canvas {
    /// The origin of the surface coordinates sits at the center of the canvas.
    pub fn new(width: u32, height: u32, background_color: Color) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
            background_color,
            discarded: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maps surface coordinates to an index into `pixels`, if they land on the canvas.
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let column = x.checked_add(i64::from(self.width / 2))?;
        let row = y.checked_add(i64::from(self.height / 2))?;
        let inside = (0..i64::from(self.width)).contains(&column)
            && (0..i64::from(self.height)).contains(&row);
        inside.then(|| row as usize * self.width as usize + column as usize)
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).and_then(|i| self.pixels[i])
    }

    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn to_svg(&self) -> Document {
        let background = Rectangle::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("fill", self.background_color.to_hex());

        let document = Document::new()
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .add(background);

        self.pixels
            .iter()
            .enumerate()
            .filter_map(|(i, pixel)| pixel.map(|color| (i, color)))
            .fold(document, |document, (i, color)| {
                let width = self.width as usize;
                document.add(
                    Rectangle::new()
                        .set("x", (i % width) as u32)
                        .set("y", (i / width) as u32)
                        .set("width", 1)
                        .set("height", 1)
                        .set("fill", color.to_hex()),
                )
            })
    }

    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        svg::save(path, &self.to_svg())
            .with_context(|| format!("Couldn't write the canvas to '{}'", path.display()))?;
        debug!(
            "Saved {} painted pixels to '{}'",
            self.painted(),
            path.display()
        );
        Ok(())
    }
}

impl Surface for Canvas {
    fn emit(&mut self, x: i64, y: i64, color: Color) {
        match self.index(x, y) {
            Some(i) => self.pixels[i] = Some(color),
            None => self.discarded += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn canvas() -> Canvas {
        Canvas::new(10, 6, Color::from_hex("#808080").unwrap())
    }

    fn gold() -> Color {
        Color::from_hex("#ffd700").unwrap()
    }

    #[rstest]
    fn origin_is_centered(mut canvas: Canvas) {
        canvas.emit(0, 0, gold());
        canvas.emit(-5, -3, gold());
        canvas.emit(4, 2, gold());
        assert_eq!(canvas.painted(), 3);
        assert_eq!(canvas.discarded(), 0);
        assert_eq!(canvas.pixel(0, 0), Some(gold()));
        assert_eq!(canvas.pixel(1, 0), None);
    }

    #[rstest]
    #[case(5, 0)]
    #[case(-6, 0)]
    #[case(0, 3)]
    #[case(0, -4)]
    #[case(i64::MAX, i64::MIN)]
    fn out_of_range_pixels_are_ignored(mut canvas: Canvas, #[case] x: i64, #[case] y: i64) {
        canvas.emit(x, y, gold());
        assert_eq!(canvas.painted(), 0);
        assert_eq!(canvas.discarded(), 1);
        assert_eq!(canvas.pixel(x, y), None);
    }

    #[rstest]
    fn repainting_keeps_the_last_color(mut canvas: Canvas) {
        let black = Color::from_hex("#000000").unwrap();
        canvas.emit(1, 1, gold());
        canvas.emit(1, 1, black);
        assert_eq!(canvas.painted(), 1);
        assert_eq!(canvas.pixel(1, 1), Some(black));
    }

    #[rstest]
    fn svg_has_a_rect_per_painted_pixel(mut canvas: Canvas) {
        canvas.emit(0, 0, gold());
        canvas.emit(2, -1, gold());
        let svg = canvas.to_svg().to_string();
        // background plus two pixels
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("#ffd700"));
        assert!(svg.contains("#808080"));
    }

    #[rstest]
    fn saves_svg_to_disk(mut canvas: Canvas) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.svg");
        canvas.emit(0, 0, gold());
        canvas.save_svg(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("#ffd700"));
    }

    #[rstest]
    fn recording_surface_keeps_order() {
        let mut record: Vec<(Pixel, Color)> = Vec::new();
        record.emit(3, 4, gold());
        record.emit(-1, 0, gold());
        let pixels: Vec<Pixel> = record.iter().map(|(p, _)| *p).collect();
        assert_eq!(pixels, vec![Pixel { x: 3, y: 4 }, Pixel { x: -1, y: 0 }]);
    }
}
