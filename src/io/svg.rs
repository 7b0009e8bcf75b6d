//! SVG export of rendered 2D outlines.

use crate::float_types::Real;
use crate::io::IoError;
use crate::sketch::Outline;
use std::path::Path;
use svg::Document;
use svg::node::element::Path as SvgPath;
use svg::node::element::path::Data;

/// Stroke width as a fraction of the larger drawing extent.
const STROKE_FRACTION: Real = 0.005;

impl Outline {
    /// Build an SVG document with one `<path>` holding every segment.
    ///
    /// SVG's y axis points down, so y is negated; the view box is the
    /// outline's bounding box.
    #[allow(clippy::unnecessary_cast)]
    pub fn to_svg_document(&self) -> Document {
        let Some(bounds) = self.bounding_box() else {
            return Document::new().set("viewBox", (0, 0, 0, 0));
        };
        let extents = bounds.extents();
        let stroke = extents.x.max(extents.y).max(Real::EPSILON) * STROKE_FRACTION;

        // the svg crate stores numbers as f32
        let data = self.segments.iter().fold(Data::new(), |data, s| {
            data.move_to((s.start.x as f32, -s.start.y as f32))
                .line_to((s.end.x as f32, -s.end.y as f32))
        });
        let path = SvgPath::new()
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", stroke as f32)
            .set("d", data);

        let view_box = (
            bounds.mins.x as f32,
            -bounds.maxs.y as f32,
            extents.x as f32,
            extents.y as f32,
        );
        Document::new().set("viewBox", view_box).add(path)
    }

    pub fn to_svg(&self) -> String {
        self.to_svg_document().to_string()
    }

    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<(), IoError> {
        svg::save(path, &self.to_svg_document())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::sketch::{Outline, Segment};
    use nalgebra::Point2;

    #[test]
    fn segments_become_path_commands() {
        let outline = Outline::new(vec![
            Segment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)),
            Segment::new(Point2::new(2.0, 0.0), Point2::new(2.0, 1.0)),
        ]);
        let text = outline.to_svg();
        assert!(text.contains("<svg"));
        assert!(text.contains("<path"));
        assert!(text.contains("viewBox=\"0 -1 2 1\""));
        assert_eq!(text.matches('M').count(), 2);
    }

    #[test]
    fn empty_outline_is_an_empty_drawing() {
        let text = Outline::default().to_svg();
        assert!(!text.contains("<path"));
    }
}
