use crate::core::models::channel::ChannelKind;
use crate::core::models::error::QueryError;
use crate::core::models::joint::JointDef;
use crate::core::models::skeleton::Skeleton;
use crate::core::models::table::{Column, MotionTable, TIME_COLUMN};
use tracing::{debug, instrument};

/// Answers per-joint motion queries against one skeleton and the table parsed with it.
///
/// Both inputs are borrowed immutably and every query returns a freshly allocated table, so a
/// single `MotionQuery` (or many) can serve concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct MotionQuery<'a> {
    skeleton: &'a Skeleton,
    table: &'a MotionTable,
}

impl<'a> MotionQuery<'a> {
    pub fn new(skeleton: &'a Skeleton, table: &'a MotionTable) -> Self {
        Self { skeleton, table }
    }

    pub fn skeleton(&self) -> &'a Skeleton {
        self.skeleton
    }

    pub fn table(&self) -> &'a MotionTable {
        self.table
    }

    /// Returns `time` plus the joint's six channels, named without the joint prefix.
    ///
    /// # Errors
    ///
    /// - [`QueryError::UnknownJoint`] if the joint is not in the skeleton.
    /// - [`QueryError::MissingChannel`] if the joint does not declare all six channels.
    /// - [`QueryError::Inconsistent`] if a declared channel has no column in the table.
    pub fn relative_motion(&self, joint: &str) -> Result<MotionTable, QueryError> {
        let def = self.require(joint)?;
        for kind in ChannelKind::ALL {
            if !def.has_channel(kind) {
                return Err(QueryError::MissingChannel {
                    joint: joint.to_string(),
                    channel: kind,
                });
            }
            self.column(&kind.column_name(joint))?;
        }
        relative_motion(self.table, joint)
    }

    /// Returns `time` plus the joint's own channels, with positions accumulated along the path
    /// to the root.
    ///
    /// Each position channel of `joint` is summed row by row with the same channel of every
    /// ancestor on the path. Rotation channels pass through unchanged. A missing cell anywhere in
    /// a sum makes the result cell missing. The result keeps the joint's declared channels only,
    /// so a sibling named with the joint's name as prefix (`arm_twist` for `arm`) never leaks in.
    ///
    /// **This is not forward kinematics.** Ancestor rotations are ignored, so the result is only
    /// a true world position when no ancestor is rotated.
    ///
    /// # Errors
    ///
    /// - [`QueryError::UnknownJoint`] if the joint is not in the skeleton.
    /// - [`QueryError::MissingChannel`] if the joint, or any ancestor, lacks one of the X/Y/Z
    ///   position channels.
    /// - [`QueryError::Inconsistent`] if a declared channel has no column in the table.
    #[instrument(skip(self), level = "debug")]
    pub fn absolute_motion(&self, joint: &str) -> Result<MotionTable, QueryError> {
        let def = self.require(joint)?;
        if let Some(&kind) = ChannelKind::POSITIONS.iter().find(|&&k| !def.has_channel(k)) {
            return Err(QueryError::MissingChannel {
                joint: joint.to_string(),
                channel: kind,
            });
        }
        let path = self.skeleton.path_to_root(joint)?;
        debug!(path = ?path, "Accumulating positions along path to root.");

        let mut columns = Vec::with_capacity(def.channels.len() + 1);
        columns.push(Column {
            name: TIME_COLUMN.to_string(),
            values: self.table.time().to_vec(),
        });

        for &kind in &def.channels {
            let mut values = self.column(&kind.column_name(joint))?.to_vec();
            if kind.is_position() {
                for ancestor in &path[1..] {
                    let ancestor = self.require(ancestor)?;
                    if !ancestor.has_channel(kind) {
                        return Err(QueryError::MissingChannel {
                            joint: ancestor.name.clone(),
                            channel: kind,
                        });
                    }
                    let offsets = self.column(&kind.column_name(&ancestor.name))?;
                    for (value, offset) in values.iter_mut().zip(offsets) {
                        *value = value.zip(*offset).map(|(a, b)| a + b);
                    }
                }
            }
            columns.push(Column {
                name: kind.as_str().to_string(),
                values,
            });
        }

        Ok(MotionTable::from_columns(
            self.table.frame_time(),
            self.table.declared_frame_count(),
            columns,
        ))
    }

    fn require(&self, joint: &str) -> Result<&'a JointDef, QueryError> {
        self.skeleton
            .joint(joint)
            .ok_or_else(|| QueryError::UnknownJoint(joint.to_string()))
    }

    fn column(&self, name: &str) -> Result<&'a [Option<f64>], QueryError> {
        self.table.column(name).ok_or_else(|| QueryError::Inconsistent {
            column: name.to_string(),
        })
    }
}

/// Projects `time` plus the six `{joint}_*` channel columns of `table`, named without the
/// joint prefix.
///
/// This works on the table alone; use [`MotionQuery::relative_motion`] to also validate the
/// joint against a skeleton.
pub fn relative_motion(table: &MotionTable, joint: &str) -> Result<MotionTable, QueryError> {
    let sources: Vec<String> = ChannelKind::ALL
        .iter()
        .map(|kind| kind.column_name(joint))
        .collect();
    let selection: Vec<(&str, &str)> = sources
        .iter()
        .zip(ChannelKind::ALL)
        .map(|(source, kind)| (source.as_str(), kind.as_str()))
        .collect();
    table.project(&selection)
}

/// See [`MotionQuery::absolute_motion`].
pub fn absolute_motion(
    table: &MotionTable,
    skeleton: &Skeleton,
    joint: &str,
) -> Result<MotionTable, QueryError> {
    MotionQuery::new(skeleton, table).absolute_motion(joint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::bvh::parse;

    const CHAIN: &str = "\
HIERARCHY
ROOT root
{
  OFFSET 0 0 0
  CHANNELS 6 Xposition Yposition Zposition Xrotation Yrotation Zrotation
  JOINT child
  {
    OFFSET 0 1 0
    CHANNELS 6 Xposition Yposition Zposition Xrotation Yrotation Zrotation
    JOINT wrist
    {
      OFFSET 0 1 0
      CHANNELS 3 Zrotation Xrotation Yrotation
      End Site
      {
        OFFSET 0 1 0
      }
    }
  }
  JOINT leg
  {
    OFFSET 1 0 0
    CHANNELS 6 Xposition Yposition Zposition Xrotation Yrotation Zrotation
  }
}
MOTION
Frames: 2
Frame Time: 0.1
1 2 3 4 5 6 0.1 0 0 7 8 9 10 11 12 5 5 5 13 14 15
1 2 3 4 5 6 0.2 x 0 7 8 9 10 11 12 5 5 5 13 14 15
";

    fn parsed() -> (Skeleton, MotionTable) {
        parse(CHAIN).unwrap()
    }

    fn values(table: &MotionTable, name: &str) -> Vec<Option<f64>> {
        table.column(name).unwrap().to_vec()
    }

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn relative_motion_has_time_and_six_unprefixed_columns() {
        let (skeleton, table) = parsed();
        let query = MotionQuery::new(&skeleton, &table);
        let relative = query.relative_motion("child").unwrap();
        let names: Vec<&str> = relative.column_names().collect();
        assert_eq!(
            names,
            vec!["time", "Xposition", "Yposition", "Zposition", "Xrotation", "Yrotation", "Zrotation"]
        );
        assert_eq!(values(&relative, "Xrotation"), vec![Some(7.0), Some(7.0)]);
        assert_eq!(values(&relative, "Yposition"), vec![Some(0.0), None]);
        assert_eq!(relative.time(), table.time());
    }

    #[test]
    fn relative_motion_requires_all_six_channels() {
        let (skeleton, table) = parsed();
        let query = MotionQuery::new(&skeleton, &table);
        assert_eq!(
            query.relative_motion("wrist"),
            Err(QueryError::MissingChannel {
                joint: "wrist".to_string(),
                channel: ChannelKind::Xposition
            })
        );
        assert_eq!(
            relative_motion(&table, "wrist"),
            Err(QueryError::UnknownColumn("wrist_Xposition".to_string()))
        );
    }

    #[test]
    fn queries_reject_unknown_joint() {
        let (skeleton, table) = parsed();
        let query = MotionQuery::new(&skeleton, &table);
        let expected = Err(QueryError::UnknownJoint("tail".to_string()));
        assert_eq!(query.relative_motion("tail"), expected);
        assert_eq!(query.absolute_motion("tail"), expected);
        assert!(expected.unwrap_err().is_lookup());
    }

    #[test]
    fn absolute_motion_of_root_equals_relative_motion() {
        let (skeleton, table) = parsed();
        let query = MotionQuery::new(&skeleton, &table);
        assert_eq!(
            query.absolute_motion("root").unwrap(),
            query.relative_motion("root").unwrap()
        );
    }

    #[test]
    fn absolute_motion_adds_ancestor_positions() {
        let (skeleton, table) = parsed();
        let absolute = absolute_motion(&table, &skeleton, "child").unwrap();
        let x = values(&absolute, "Xposition");
        assert!(close(x[0], 1.1));
        assert!(close(x[1], 1.2));
        let y = values(&absolute, "Yposition");
        assert!(close(y[0], 2.0));
        assert_eq!(y[1], None);
        assert_eq!(values(&absolute, "Zrotation"), vec![Some(9.0), Some(9.0)]);
    }

    #[test]
    fn absolute_motion_keeps_only_the_joints_own_columns() {
        let (skeleton, table) = parsed();
        let absolute = absolute_motion(&table, &skeleton, "leg").unwrap();
        assert_eq!(absolute.column_count(), 7);
        assert!(close(values(&absolute, "Xposition")[0], 6.0));
        assert!(close(values(&absolute, "Zposition")[0], 8.0));
        assert_eq!(values(&absolute, "Xrotation"), vec![Some(13.0), Some(13.0)]);
        assert!(!absolute.has_column("leg_Xposition"));
    }

    #[test]
    fn absolute_motion_requires_position_channels() {
        let (skeleton, table) = parsed();
        let result = absolute_motion(&table, &skeleton, "wrist");
        assert!(matches!(
            result,
            Err(QueryError::MissingChannel {
                channel: ChannelKind::Xposition,
                ..
            })
        ));
    }

    #[test]
    fn absolute_motion_requires_position_channels_on_every_ancestor() {
        let text = "\
ROOT root
{
  OFFSET 0 0 0
  CHANNELS 3 Zrotation Xrotation Yrotation
  JOINT child
  {
    OFFSET 0 1 0
    CHANNELS 6 Xposition Yposition Zposition Xrotation Yrotation Zrotation
  }
}
MOTION
Frames: 1
Frame Time: 0.1
0 0 0 4 5 6 0 0 0
";
        let (skeleton, table) = parse(text).unwrap();
        assert_eq!(
            absolute_motion(&table, &skeleton, "child"),
            Err(QueryError::MissingChannel {
                joint: "root".to_string(),
                channel: ChannelKind::Xposition
            })
        );
        assert!(absolute_motion(&table, &skeleton, "root").is_err());
    }

    #[test]
    fn absolute_motion_ignores_joints_sharing_the_name_prefix() {
        let text = "\
ROOT arm
{
  OFFSET 0 0 0
  CHANNELS 6 Xposition Yposition Zposition Xrotation Yrotation Zrotation
  JOINT arm_twist
  {
    OFFSET 0 1 0
    CHANNELS 6 Xposition Yposition Zposition Xrotation Yrotation Zrotation
  }
}
MOTION
Frames: 1
Frame Time: 0.1
1 2 3 4 5 6 7 8 9 10 11 12
";
        let (skeleton, table) = parse(text).unwrap();
        let absolute = absolute_motion(&table, &skeleton, "arm").unwrap();
        let names: Vec<&str> = absolute.column_names().collect();
        assert_eq!(
            names,
            vec!["time", "Xposition", "Yposition", "Zposition", "Xrotation", "Yrotation", "Zrotation"]
        );
        assert_eq!(values(&absolute, "Xposition"), vec![Some(1.0)]);

        let twist = absolute_motion(&table, &skeleton, "arm_twist").unwrap();
        assert!(close(values(&twist, "Xposition")[0], 8.0));
        assert_eq!(values(&twist, "Xrotation"), vec![Some(10.0)]);
    }

    #[test]
    fn queries_detect_table_that_does_not_match_skeleton() {
        let (skeleton, table) = parsed();
        let trimmed = table
            .project(&[("root_Xposition", "root_Xposition")])
            .unwrap();
        let query = MotionQuery::new(&skeleton, &trimmed);
        assert!(matches!(
            query.absolute_motion("root"),
            Err(QueryError::Inconsistent { .. })
        ));
        let err = query.relative_motion("child").unwrap_err();
        assert_eq!(
            err,
            QueryError::Inconsistent {
                column: "child_Xposition".to_string()
            }
        );
        assert!(!err.is_lookup());
    }

    #[test]
    fn queries_are_idempotent_and_leave_base_table_untouched() {
        let (skeleton, table) = parsed();
        let before = table.clone();
        let query = MotionQuery::new(&skeleton, &table);
        let first = query.absolute_motion("child").unwrap();
        let second = query.absolute_motion("child").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            query.relative_motion("leg").unwrap(),
            query.relative_motion("leg").unwrap()
        );
        assert_eq!(table, before);
    }
}
