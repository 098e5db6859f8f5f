//! Dependency arrow routing.

use crate::core::BarTask;
use crate::render::frame::ArrowShape;
use crate::render::primitives::Point;

const HEAD_SIZE: f64 = 5.0;

/// Sizing inputs of [`route_arrow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowLayout {
    pub row_height: f64,
    pub arrow_indent: f64,
    pub rtl: bool,
}

/// Routes the connector from `from` (the dependency) to `to` (its dependent).
///
/// The path leaves the trailing edge of `from` at its vertical centre (the
/// diamond centre for milestones), steps half a row towards `to`, doubles
/// back when `to` starts too close, and enters the leading edge of `to`
/// horizontally. Under RTL the trailing edge is `x1`.
#[must_use]
pub fn route_arrow(from: &BarTask, to: &BarTask, layout: ArrowLayout) -> ArrowShape {
    let indent = layout.arrow_indent;
    let direction = if from.index > to.index { -1.0 } else { 1.0 };
    let from_y = from.y + from.height / 2.0;
    let to_y = to.y + to.height / 2.0;
    let mid_y = from_y + direction * layout.row_height / 2.0;

    let (points, head) = if layout.rtl {
        let exit_x = from.x1 - indent;
        let bend_x = if from.x1 - indent * 2.0 > to.x2 {
            exit_x
        } else {
            to.x2 + indent
        };
        let points = vec![
            Point::new(from.x1, from_y),
            Point::new(exit_x, from_y),
            Point::new(exit_x, mid_y),
            Point::new(bend_x, mid_y),
            Point::new(bend_x, to_y),
            Point::new(to.x2, to_y),
        ];
        let head = [
            Point::new(to.x2, to_y),
            Point::new(to.x2 + HEAD_SIZE, to_y - HEAD_SIZE),
            Point::new(to.x2 + HEAD_SIZE, to_y + HEAD_SIZE),
        ];
        (points, head)
    } else {
        let exit_x = from.x2 + indent;
        let bend_x = if from.x2 + indent * 2.0 < to.x1 {
            exit_x
        } else {
            to.x1 - indent
        };
        let points = vec![
            Point::new(from.x2, from_y),
            Point::new(exit_x, from_y),
            Point::new(exit_x, mid_y),
            Point::new(bend_x, mid_y),
            Point::new(bend_x, to_y),
            Point::new(to.x1, to_y),
        ];
        let head = [
            Point::new(to.x1, to_y),
            Point::new(to.x1 - HEAD_SIZE, to_y - HEAD_SIZE),
            Point::new(to.x1 - HEAD_SIZE, to_y + HEAD_SIZE),
        ];
        (points, head)
    };

    ArrowShape {
        from_id: from.id().to_owned(),
        to_id: to.id().to_owned(),
        points: dedup_points(points),
        head,
    }
}

fn dedup_points(mut points: Vec<Point>) -> Vec<Point> {
    points.dedup();
    points
}
