//! Geometry Mapper: letterbox fitting and natural↔render coordinate
//! conversion, so click markers, hit-zones, and heat blobs stay aligned
//! with the stimulus image at any viewport size.

use serde::Serialize;

use crate::models::{HitZone, HitZoneRegion};

/// A validated, strictly positive 2D extent. `None` means the geometry is
/// not yet known (image still loading) and overlay computation must be
/// suppressed instead of dividing by an unknown dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Option<Size> {
        (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
            .then_some(Size { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    fn ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// How a natural-size image letterboxes into its render box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDrawRect {
    pub draw_width: f64,
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// A hit-zone rectangle projected into render space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A hit-zone expressed in percentages of the natural image, with the
/// natural-pixel rectangle retained for render-space projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentZone {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub original_coords: Option<HitZoneRegion>,
}

/// Fit-contain letterboxing: the image fills the render box along one axis
/// and centers along the other. Exactly one drawn dimension equals its
/// render bound; the other never exceeds it.
pub fn image_draw_rect(natural: Size, render: Size) -> ImageDrawRect {
    let img_ratio = natural.ratio();
    let render_ratio = render.ratio();

    if img_ratio > render_ratio {
        // Image is relatively wider: full render width, centered vertically.
        let draw_height = render.width() / img_ratio;
        ImageDrawRect {
            draw_width: render.width(),
            draw_height,
            offset_x: 0.0,
            offset_y: (render.height() - draw_height) / 2.0,
        }
    } else {
        let draw_width = render.height() * img_ratio;
        ImageDrawRect {
            draw_width,
            draw_height: render.height(),
            offset_x: (render.width() - draw_width) / 2.0,
            offset_y: 0.0,
        }
    }
}

/// Map a natural-pixel point into render space through the draw rect.
pub fn natural_to_render(rect: &ImageDrawRect, natural: Size, x: f64, y: f64) -> (f64, f64) {
    (
        rect.offset_x + x * (rect.draw_width / natural.width()),
        rect.offset_y + y * (rect.draw_height / natural.height()),
    )
}

/// Project a hit-zone's natural-pixel rectangle into render space.
pub fn project_zone(rect: &ImageDrawRect, natural: Size, zone: &HitZone) -> RenderRect {
    let scale_x = rect.draw_width / natural.width();
    let scale_y = rect.draw_height / natural.height();
    RenderRect {
        x: rect.offset_x + zone.region.x * scale_x,
        y: rect.offset_y + zone.region.y * scale_y,
        width: zone.region.width * scale_x,
        height: zone.region.height * scale_y,
    }
}

/// Classify a render-space click against the configured hit-zones, the way
/// the participant task does: first projected zone containing the point
/// wins, in configuration order.
pub fn hit_test<'a>(
    rect: &ImageDrawRect,
    natural: Size,
    zones: &'a [HitZone],
    x: f64,
    y: f64,
) -> Option<&'a HitZone> {
    zones
        .iter()
        .find(|zone| project_zone(rect, natural, zone).contains(x, y))
}

/// Convert hit-zones to percentage coordinates. With the natural size still
/// unknown the pixel values pass through unscaled and no original rect is
/// attached.
pub fn zones_to_percentages(zones: &[HitZone], natural: Option<Size>) -> Vec<PercentZone> {
    zones
        .iter()
        .map(|zone| match natural {
            Some(size) => PercentZone {
                id: zone.id.clone(),
                x: zone.region.x / size.width() * 100.0,
                y: zone.region.y / size.height() * 100.0,
                width: zone.region.width / size.width() * 100.0,
                height: zone.region.height / size.height() * 100.0,
                original_coords: Some(zone.region),
            },
            None => PercentZone {
                id: zone.id.clone(),
                x: zone.region.x,
                y: zone.region.y,
                width: zone.region.width,
                height: zone.region.height,
                original_coords: None,
            },
        })
        .collect()
}
