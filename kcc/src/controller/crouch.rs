use crate::collision::{CollisionQuery, LayerMask, Vec3, types::up};

use super::config::BodyShape;

/// Whether there is head room to grow from crouch height back to standing height.
pub fn can_stand<Q: CollisionQuery + ?Sized>(
    query: &Q,
    body: &BodyShape,
    mask: LayerMask,
    position: Vec3,
) -> bool {
    let crouched = body.cast_capsule(true);
    let distance = body.standing_height - body.crouch_height + body.skin_width;
    query
        .sphere_cast_all(
            crouched.tip_center(position),
            crouched.cast_radius(),
            up(),
            distance,
            mask,
        )
        .is_empty()
}

/// Next crouch flag given the current one and the request.
///
/// Crouching always succeeds. Standing up only happens when nothing is overhead;
/// otherwise the body stays crouched and retries next step.
pub fn next_crouch_state<Q: CollisionQuery + ?Sized>(
    query: &Q,
    body: &BodyShape,
    mask: LayerMask,
    position: Vec3,
    crouching: bool,
    wants_crouch: bool,
) -> bool {
    match (crouching, wants_crouch) {
        (false, true) => true,
        (true, false) => {
            if can_stand(query, body, mask, position) {
                false
            } else {
                log::debug!("stand blocked overhead at {position:?}");
                true
            }
        }
        (current, _) => current,
    }
}
