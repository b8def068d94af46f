use super::channel::ChannelKind;
use super::error::QueryError;
use super::joint::JointDef;
use std::collections::{HashMap, HashSet};

/// One `(joint, channel)` column of the motion section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelSlot {
    pub joint: String,
    pub kind: ChannelKind,
}

impl ChannelSlot {
    pub fn column_name(&self) -> String {
        self.kind.column_name(&self.joint)
    }
}

/// The declaration-order sequence of channels across all joints of a skeleton.
///
/// Every motion row holds exactly one value per slot, in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelLayout {
    slots: Vec<ChannelSlot>,
}

impl ChannelLayout {
    /// Walks `joints` in the given order and appends each joint's channels.
    pub fn from_joints<'a>(joints: impl IntoIterator<Item = &'a JointDef>) -> Self {
        let slots = joints
            .into_iter()
            .flat_map(|joint| {
                joint.channels.iter().map(move |&kind| ChannelSlot {
                    joint: joint.name.clone(),
                    kind,
                })
            })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelSlot> {
        self.slots.iter()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.slots.iter().map(ChannelSlot::column_name).collect()
    }

    /// Index of the slot for `joint`/`kind` within a motion row.
    pub fn position_of(&self, joint: &str, kind: ChannelKind) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.joint == joint && slot.kind == kind)
    }
}

/// A parsed joint hierarchy.
///
/// Joints are stored in declaration order and indexed by name. The skeleton is a single tree:
/// exactly one joint has no parent, and every other joint's parent resolves to a joint declared
/// before it. A `Skeleton` is only produced by [`SkeletonBuilder`](super::builder::SkeletonBuilder),
/// which enforces these invariants.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub(super) joints: Vec<JointDef>,
    pub(super) joint_index: HashMap<String, usize>,
    pub(super) root_idx: usize,
    pub(super) layout: ChannelLayout,
}

impl Skeleton {
    pub fn root(&self) -> &JointDef {
        &self.joints[self.root_idx]
    }

    pub fn joint(&self, name: &str) -> Option<&JointDef> {
        self.joint_index.get(name).map(|&idx| &self.joints[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.joint_index.contains_key(name)
    }

    /// Returns an iterator over all joints in declaration order.
    pub fn joints(&self) -> impl Iterator<Item = &JointDef> {
        self.joints.iter()
    }

    pub fn joint_names(&self) -> HashSet<&str> {
        self.joints.iter().map(|j| j.name.as_str()).collect()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn channel_layout(&self) -> &ChannelLayout {
        &self.layout
    }

    /// Returns the direct children of `name` in declaration order.
    pub fn children(&self, name: &str) -> Result<Vec<&JointDef>, QueryError> {
        self.require(name)?;
        Ok(self
            .joints
            .iter()
            .filter(|j| j.parent.as_deref() == Some(name))
            .collect())
    }

    /// Returns the chain `[name, parent(name), ..., root]`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownJoint`] if `name` is not part of the skeleton.
    pub fn path_to_root(&self, name: &str) -> Result<Vec<&str>, QueryError> {
        let mut current = self.require(name)?;
        let mut path = vec![current.name.as_str()];
        while let Some(parent) = current.parent.as_deref() {
            current = self.require(parent)?;
            path.push(current.name.as_str());
        }
        Ok(path)
    }

    /// Number of edges between `name` and the root.
    pub fn depth(&self, name: &str) -> Result<usize, QueryError> {
        Ok(self.path_to_root(name)?.len() - 1)
    }

    fn require(&self, name: &str) -> Result<&JointDef, QueryError> {
        self.joint(name)
            .ok_or_else(|| QueryError::UnknownJoint(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::builder::SkeletonBuilder;
    use super::*;

    fn six() -> Vec<ChannelKind> {
        ChannelKind::ALL.to_vec()
    }

    fn arm_skeleton() -> Skeleton {
        let mut builder = SkeletonBuilder::new();
        builder
            .add_joint("root", None)
            .unwrap()
            .set_channels("root", six())
            .unwrap()
            .add_joint("spine", Some("root"))
            .unwrap()
            .set_channels("spine", six())
            .unwrap()
            .add_joint("l_arm", Some("spine"))
            .unwrap()
            .set_channels("l_arm", vec![ChannelKind::Zrotation, ChannelKind::Xrotation])
            .unwrap()
            .add_joint("l_leg", Some("root"))
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn path_to_root_of_root_is_single_element() {
        let skeleton = arm_skeleton();
        assert_eq!(skeleton.path_to_root("root").unwrap(), vec!["root"]);
        assert_eq!(skeleton.depth("root").unwrap(), 0);
    }

    #[test]
    fn path_to_root_walks_parents_up_to_root() {
        let skeleton = arm_skeleton();
        let path = skeleton.path_to_root("l_arm").unwrap();
        assert_eq!(path, vec!["l_arm", "spine", "root"]);
        assert_eq!(path.len(), skeleton.depth("l_arm").unwrap() + 1);
        assert_eq!(path.last(), Some(&skeleton.root().name.as_str()));
    }

    #[test]
    fn path_to_root_rejects_unknown_joint() {
        let skeleton = arm_skeleton();
        assert_eq!(
            skeleton.path_to_root("tail"),
            Err(QueryError::UnknownJoint("tail".to_string()))
        );
    }

    #[test]
    fn joint_names_contains_every_declared_joint() {
        let skeleton = arm_skeleton();
        let names = skeleton.joint_names();
        assert_eq!(names.len(), 4);
        for name in ["root", "spine", "l_arm", "l_leg"] {
            assert!(names.contains(name));
        }
        assert_eq!(skeleton.joint_count(), 4);
    }

    #[test]
    fn children_are_returned_in_declaration_order() {
        let skeleton = arm_skeleton();
        let children: Vec<&str> = skeleton
            .children("root")
            .unwrap()
            .iter()
            .map(|j| j.name.as_str())
            .collect();
        assert_eq!(children, vec!["spine", "l_leg"]);
        assert!(skeleton.children("l_leg").unwrap().is_empty());
        assert!(skeleton.children("nope").is_err());
    }

    #[test]
    fn channel_layout_follows_declaration_order() {
        let skeleton = arm_skeleton();
        let layout = skeleton.channel_layout();
        assert_eq!(layout.len(), 14);
        let names = layout.column_names();
        assert_eq!(names[0], "root_Xposition");
        assert_eq!(names[6], "spine_Xposition");
        assert_eq!(names[12], "l_arm_Zrotation");
        assert_eq!(names[13], "l_arm_Xrotation");
        assert_eq!(layout.position_of("l_arm", ChannelKind::Xrotation), Some(13));
        assert_eq!(layout.position_of("l_leg", ChannelKind::Xrotation), None);
    }
}
