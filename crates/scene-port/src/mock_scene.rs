//! MockScene: deterministic test double implementing Scene.
//!
//! Keeps every added primitive in memory with its visibility and highlight
//! state, hands out sequential helper ids, and applies per-object rigid
//! transforms for local-to-world lookups.
//! Used by measure-engine, panel-bridge and test-harness for testing.

use std::collections::{BTreeMap, HashMap};

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};
use tracing::debug;

use measure_types::{HelperId, HelperKind, LabelKind, ObjectId, Vec3};

use crate::traits::Scene;
use crate::types::{Primitive, SceneError};

/// A primitive as the mock scene holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct MockNode {
    pub primitive: Primitive,
    pub visible: bool,
    pub highlighted: bool,
}

/// Deterministic in-memory scene.
#[derive(Debug, Default)]
pub struct MockScene {
    next_id: u64,
    nodes: BTreeMap<HelperId, MockNode>,
    transforms: HashMap<ObjectId, Isometry3<f64>>,
    /// Total number of successful removals, for leak checks.
    removed: usize,
}

impl MockScene {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Place an object in the world with a rigid transform.
    pub fn set_transform(&mut self, object: ObjectId, transform: Isometry3<f64>) {
        self.transforms.insert(object, transform);
    }

    /// Place an object by translation only.
    pub fn set_translation(&mut self, object: ObjectId, offset: Vec3) {
        self.set_transform(
            object,
            Isometry3::from_parts(Translation3::from(offset), UnitQuaternion::identity()),
        );
    }

    /// Number of primitives currently in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn removed_count(&self) -> usize {
        self.removed
    }

    pub fn node(&self, id: HelperId) -> Option<&MockNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (HelperId, &MockNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Count primitives of a given kind.
    pub fn count(&self, kind: HelperKind) -> usize {
        self.nodes
            .values()
            .filter(|n| n.primitive.kind() == kind)
            .count()
    }

    /// Texts of all labels of the given kind, in insertion order.
    pub fn label_texts(&self, kind: LabelKind) -> Vec<String> {
        self.nodes
            .values()
            .filter_map(|n| match &n.primitive {
                Primitive::Label {
                    text, kind: k, ..
                } if *k == kind => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Find the first label whose text matches exactly.
    pub fn find_label(&self, text: &str) -> Option<(HelperId, &MockNode)> {
        self.nodes
            .iter()
            .find(|(_, n)| n.primitive.text() == Some(text))
            .map(|(id, n)| (*id, n))
    }

    fn node_mut(&mut self, id: HelperId) -> Result<&mut MockNode, SceneError> {
        self.nodes
            .get_mut(&id)
            .ok_or(SceneError::HelperNotFound { id })
    }
}

impl Scene for MockScene {
    fn add(&mut self, primitive: Primitive) -> HelperId {
        // Default-constructed scenes start at zero; keep ids non-zero.
        let id = HelperId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        debug!(%id, kind = ?primitive.kind(), "mock scene add");
        self.nodes.insert(
            id,
            MockNode {
                primitive,
                visible: true,
                highlighted: false,
            },
        );
        id
    }

    fn remove(&mut self, id: HelperId) -> Result<(), SceneError> {
        self.nodes
            .remove(&id)
            .ok_or(SceneError::HelperNotFound { id })?;
        self.removed += 1;
        Ok(())
    }

    fn set_visible(&mut self, id: HelperId, visible: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    fn set_highlighted(&mut self, id: HelperId, highlighted: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.highlighted = highlighted;
        Ok(())
    }

    fn local_to_world(&self, object: ObjectId, local: Vec3) -> Vec3 {
        match self.transforms.get(&object) {
            Some(iso) => iso.transform_point(&Point3::from(local)).coords,
            None => local,
        }
    }
}
