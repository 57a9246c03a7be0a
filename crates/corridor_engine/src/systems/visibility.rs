//! Per-frame frustum pass over render-only objects

use crate::foundation::math::Mat4;
use crate::scene::{FrustumCuller, ObjectId, Scene};

/// Ids of static objects inside the view frustum, in list order
///
/// `view_projection` is `projection * view`; each object is tested with
/// `view_projection * world * applied_model`. With culling disabled every
/// static object is returned.
pub fn visible_statics(
    scene: &mut Scene,
    view_projection: &Mat4,
    culler: Option<&FrustumCuller>,
) -> Vec<ObjectId> {
    let world = *scene.world_matrix();
    let (static_nodes, _, objects) = scene.parts_mut();

    let Some(culler) = culler else {
        return static_nodes.to_vec();
    };

    let mut visible = Vec::with_capacity(static_nodes.len());
    for &id in static_nodes {
        let Some(object) = objects.get_mut(id) else {
            continue;
        };
        let pvm = view_projection * world * object.renderable.applied_model_matrix;
        if culler.is_visible(&pvm, &mut object.renderable) {
            visible.push(id);
        }
    }

    log::trace!("{} of {} static objects visible", visible.len(), static_nodes.len());
    visible
}
