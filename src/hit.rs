#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{Element, ElementId, ElementKind, ElementStore};

/// Return the topmost element under `world_pt`, if any.
///
/// Letters hit inside a `font_size` square anchored at their position
/// (rotation is ignored); balls hit inside their circle.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &ElementStore) -> Option<ElementId> {
    doc.elements()
        .iter()
        .rev()
        .find(|element| contains(element, world_pt))
        .map(|element| element.id)
}

fn contains(element: &Element, pt: Point) -> bool {
    match &element.kind {
        ElementKind::Letter(letter) => {
            let size = letter.font_size;
            pt.x >= element.x && pt.x <= element.x + size && pt.y >= element.y && pt.y <= element.y + size
        }
        ElementKind::Ball(ball) => {
            let r = ball.size / 2.0;
            let dx = pt.x - (element.x + r);
            let dy = pt.y - (element.y + r);
            dx * dx + dy * dy <= r * r
        }
    }
}
