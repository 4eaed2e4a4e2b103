use egui::Pos2;

/// Perpendicular distance from `point` to the infinite line through `a` and `b`.
///
/// Falls back to the point-to-point distance when the line is degenerate.
pub fn distance_to_infinite_line(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let line_vec = b - a;
    let len = line_vec.length();
    if len == 0.0 {
        return point.distance(a);
    }
    let point_vec = point - a;
    (line_vec.x * point_vec.y - line_vec.y * point_vec.x).abs() / len
}

/// Whether `point` lies inside the ellipse centred at `center` with the given radii.
pub fn ellipse_contains(point: Pos2, center: Pos2, radius_x: f32, radius_y: f32) -> bool {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return false;
    }
    let nx = (point.x - center.x) / radius_x;
    let ny = (point.y - center.y) / radius_y;
    nx * nx + ny * ny <= 1.0
}

/// Square hit region of `size` centred on `center`.
pub fn square_contains(point: Pos2, center: Pos2, size: f32) -> bool {
    let half = size / 2.0;
    (point.x - center.x).abs() <= half && (point.y - center.y).abs() <= half
}
