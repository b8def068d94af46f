use super::channel::ChannelKind;
use super::joint::JointDef;
use super::skeleton::{ChannelLayout, Skeleton};
use nalgebra::Vector3;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    #[error("Duplicate joint name: '{0}'")]
    DuplicateJoint(String),

    #[error("Skeleton already has root '{existing}', cannot add second root '{name}'")]
    MultipleRoots { existing: String, name: String },

    #[error("Parent '{parent}' of joint '{joint}' has not been declared")]
    UnknownParent { joint: String, parent: String },

    #[error("Joint '{0}' has not been declared")]
    UnknownJoint(String),

    #[error("Joint '{joint}' declares the {channel} channel more than once")]
    DuplicateChannel { joint: String, channel: ChannelKind },

    #[error("Skeleton has no root joint")]
    MissingRoot,
}

/// Incrementally assembles a [`Skeleton`] while enforcing its tree invariants.
///
/// Joints must be added parents-first; the order of `add_joint` calls is the declaration order
/// that later defines the channel layout.
#[derive(Debug)]
pub struct SkeletonBuilder {
    joints: Vec<JointDef>,

    // --- Builder-specific state ---
    joint_index: HashMap<String, usize>,
    root_idx: Option<usize>,
}

impl Default for SkeletonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self {
            joints: Vec::new(),
            joint_index: HashMap::new(),
            root_idx: None,
        }
    }

    pub fn add_joint(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<&mut Self, SkeletonError> {
        if self.joint_index.contains_key(name) {
            return Err(SkeletonError::DuplicateJoint(name.to_string()));
        }
        match parent {
            None => {
                if let Some(root_idx) = self.root_idx {
                    return Err(SkeletonError::MultipleRoots {
                        existing: self.joints[root_idx].name.clone(),
                        name: name.to_string(),
                    });
                }
                self.root_idx = Some(self.joints.len());
            }
            Some(parent) if !self.joint_index.contains_key(parent) => {
                return Err(SkeletonError::UnknownParent {
                    joint: name.to_string(),
                    parent: parent.to_string(),
                });
            }
            Some(_) => {}
        }

        debug!(joint = name, parent = ?parent, "Registered joint.");
        self.joint_index.insert(name.to_string(), self.joints.len());
        self.joints.push(JointDef::new(name, parent));
        Ok(self)
    }

    pub fn set_offset(
        &mut self,
        joint: &str,
        offset: Vector3<f64>,
    ) -> Result<&mut Self, SkeletonError> {
        self.joint_mut(joint)?.offset = offset;
        Ok(self)
    }

    pub fn set_channels(
        &mut self,
        joint: &str,
        channels: Vec<ChannelKind>,
    ) -> Result<&mut Self, SkeletonError> {
        for (i, channel) in channels.iter().enumerate() {
            if channels[..i].contains(channel) {
                return Err(SkeletonError::DuplicateChannel {
                    joint: joint.to_string(),
                    channel: *channel,
                });
            }
        }
        self.joint_mut(joint)?.channels = channels;
        Ok(self)
    }

    pub fn set_end_site(
        &mut self,
        joint: &str,
        offset: Vector3<f64>,
    ) -> Result<&mut Self, SkeletonError> {
        self.joint_mut(joint)?.end_site = Some(offset);
        Ok(self)
    }

    /// Finishes the skeleton and derives its channel layout from declaration order.
    pub fn build(self) -> Result<Skeleton, SkeletonError> {
        let root_idx = self.root_idx.ok_or(SkeletonError::MissingRoot)?;
        let layout = ChannelLayout::from_joints(&self.joints);
        Ok(Skeleton {
            joints: self.joints,
            joint_index: self.joint_index,
            root_idx,
            layout,
        })
    }

    fn joint_mut(&mut self, name: &str) -> Result<&mut JointDef, SkeletonError> {
        let idx = *self
            .joint_index
            .get(name)
            .ok_or_else(|| SkeletonError::UnknownJoint(name.to_string()))?;
        Ok(&mut self.joints[idx])
    }
}
