//! Shapes recorded for visual debugging while the simulation runs.
//!
//! Records accumulate in a thread-local frame until a [Simulation](crate::Simulation)
//! call takes them.

use crate::math::Point2d;
use crate::ItemId;
use serde_json::{json, Value};
use std::cell::RefCell;

thread_local!(
    static DEBUG_FRAME: RefCell<Vec<Value>> = Default::default();
);

/// Records a sensor ray from `origin` to where it struck `item`.
pub fn debug_ray(origin: Point2d, hit: Point2d, item: ItemId) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "ray",
            "from": [origin.x, origin.y],
            "to": [hit.x, hit.y],
            "item": item,
        }))
    })
}

/// Records the circle enclosing a cluster of `points` hits.
pub fn debug_cluster(centroid: Point2d, radius: f64, points: usize) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "cluster",
            "centre": [centroid.x, centroid.y],
            "radius": radius,
            "points": points,
        }))
    })
}

/// Takes everything recorded so far as a JSON array, leaving the frame empty.
pub fn take_debug_frame() -> Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
