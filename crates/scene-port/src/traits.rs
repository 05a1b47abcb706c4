use measure_types::{HelperId, ObjectId, Vec3};

use crate::types::{Primitive, SceneError};

/// The host renderer / scene graph the measurement tool draws into.
/// Implemented by the editor's scene adapter and by MockScene (deterministic test double).
pub trait Scene {
    /// Add a primitive to the scene and return its identity.
    fn add(&mut self, primitive: Primitive) -> HelperId;

    /// Remove a previously added primitive.
    fn remove(&mut self, id: HelperId) -> Result<(), SceneError>;

    /// Show or hide a primitive.
    fn set_visible(&mut self, id: HelperId, visible: bool) -> Result<(), SceneError>;

    /// Switch a primitive between its normal and highlight material.
    fn set_highlighted(&mut self, id: HelperId, highlighted: bool) -> Result<(), SceneError>;

    /// Transform a point from an object's local space to world space.
    /// Objects the scene does not know are treated as sitting at the origin.
    fn local_to_world(&self, object: ObjectId, local: Vec3) -> Vec3;
}
