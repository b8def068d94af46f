use super::channel::ChannelKind;
use nalgebra::Vector3;

/// A single node of a skeleton hierarchy.
///
/// Joints are created while the hierarchy section is parsed and never change afterwards.
/// The order of `channels` is the order in which the joint's values appear in every motion row.
#[derive(Debug, Clone, PartialEq)]
pub struct JointDef {
    /// Name of the joint, unique within its skeleton.
    pub name: String,
    /// Name of the parent joint, `None` only for the root.
    pub parent: Option<String>,
    /// Offset of the joint relative to its parent.
    pub offset: Vector3<f64>,
    /// Channels sampled for this joint, in declaration order.
    pub channels: Vec<ChannelKind>,
    /// Offset of the terminal `End Site` leaf attached to this joint, if any.
    pub end_site: Option<Vector3<f64>>,
}

impl JointDef {
    pub fn new(name: &str, parent: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            offset: Vector3::zeros(),
            channels: Vec::new(),
            end_site: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_channel(&self, kind: ChannelKind) -> bool {
        self.channels.contains(&kind)
    }

    /// Table column names owned by this joint, in channel order.
    pub fn column_names(&self) -> impl Iterator<Item = String> + '_ {
        self.channels
            .iter()
            .map(move |kind| kind.column_name(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_joint_has_zero_offset_and_no_channels() {
        let joint = JointDef::new("hips", None);
        assert!(joint.is_root());
        assert_eq!(joint.offset, Vector3::zeros());
        assert!(joint.channels.is_empty());
        assert!(joint.end_site.is_none());
    }

    #[test]
    fn has_channel_checks_declared_channels() {
        let mut joint = JointDef::new("spine", Some("hips"));
        joint.channels = vec![ChannelKind::Xposition, ChannelKind::Yposition];
        assert!(joint.has_channel(ChannelKind::Yposition));
        assert!(!joint.has_channel(ChannelKind::Zposition));
        assert!(!joint.is_root());
    }

    #[test]
    fn column_names_follow_channel_order() {
        let mut joint = JointDef::new("head", Some("neck"));
        joint.channels = vec![ChannelKind::Zrotation, ChannelKind::Xrotation];
        let names: Vec<String> = joint.column_names().collect();
        assert_eq!(names, vec!["head_Zrotation", "head_Xrotation"]);
    }
}
