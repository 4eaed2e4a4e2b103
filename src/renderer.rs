use std::f32::consts::TAU;

use egui::{pos2, vec2, Color32, Painter, Pos2, Rect, Shape as EguiShape, Stroke, Vec2};

use crate::editor::Editor;
use crate::shape::{DrawableShape, Style};

/// Segments used to approximate an ellipse outline
const ELLIPSE_SEGMENTS: usize = 64;

/// Paints drawables, selection outlines and gesture previews onto an egui painter.
///
/// Document coordinates are offset by `origin`, the top-left of the canvas on screen.
#[derive(Debug, Clone)]
pub struct Renderer {
    selection_color: Color32,
    handle_fill: Color32,
    preview_opacity: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            selection_color: Color32::from_rgb(0x1E, 0x90, 0xFF),
            handle_fill: Color32::WHITE,
            preview_opacity: 0.5,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the current frame
    pub fn render(&self, painter: &Painter, origin: Vec2, editor: &Editor) {
        for drawable in editor.drawables() {
            paint_drawable(painter, origin, &drawable, 1.0);
        }

        for drawable in editor.preview_drawables() {
            paint_drawable(painter, origin, &drawable, self.preview_opacity);
        }

        let outline = Stroke::new(1.0, self.selection_color);
        for selected in editor.selected_components() {
            painter.rect_stroke(selected.bound().to_rect().translate(origin), 0.0, outline);
            for handle in selected.handles() {
                let rect = Rect::from_center_size(handle.center + origin, Vec2::splat(handle.size));
                painter.rect(rect, 0.0, self.handle_fill, outline);
            }
        }
    }
}

fn stroke_of(style: &Style, opacity: f32) -> Stroke {
    Stroke::new(style.line_width, style.stroke_color.gamma_multiply(opacity))
}

/// Outline as a dashed polyline when the style asks for one.
fn dashed(points: &[Pos2], style: &Style, stroke: Stroke) -> Vec<EguiShape> {
    let dash = style.line_dash.first().copied().unwrap_or(4.0);
    let gap = style.line_dash.get(1).copied().unwrap_or(dash);
    EguiShape::dashed_line(points, stroke, dash, gap)
}

pub fn paint_drawable(painter: &Painter, origin: Vec2, drawable: &DrawableShape, opacity: f32) {
    let style = drawable.style();
    let fill = style.fill_color.gamma_multiply(opacity);
    let stroke = stroke_of(style, opacity);

    match *drawable {
        DrawableShape::Rectangle { x, y, width, height, .. } => {
            let rect = Rect::from_min_size(pos2(x, y) + origin, vec2(width, height));
            if style.is_dashed() {
                painter.rect_filled(rect, 0.0, fill);
                let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom(), rect.left_top()];
                painter.extend(dashed(&corners, style, stroke));
            } else {
                painter.rect(rect, 0.0, fill, stroke);
            }
        }
        DrawableShape::Ellipse { x, y, radius_x, radius_y, .. } => {
            let center = pos2(x, y) + origin;
            let points: Vec<Pos2> = (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let angle = TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
                    center + vec2(radius_x * angle.cos(), radius_y * angle.sin())
                })
                .collect();
            if style.is_dashed() {
                let mut outline = points.clone();
                outline.push(points[0]);
                painter.add(EguiShape::convex_polygon(points, fill, Stroke::NONE));
                painter.extend(dashed(&outline, style, stroke));
            } else {
                painter.add(EguiShape::convex_polygon(points, fill, stroke));
            }
        }
        DrawableShape::Line { x1, y1, x2, y2, .. } => {
            let points = [pos2(x1, y1) + origin, pos2(x2, y2) + origin];
            if style.is_dashed() {
                painter.extend(dashed(&points, style, stroke));
            } else {
                painter.line_segment(points, stroke);
            }
        }
    }
}
