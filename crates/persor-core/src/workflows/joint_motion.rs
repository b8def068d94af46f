use crate::core::io::bvh::BvhFile;
use crate::core::io::config::ParseConfig;
use crate::core::io::export::write_csv_path;
use crate::core::io::traits::MotionCaptureFile;
use crate::core::models::skeleton::Skeleton;
use crate::core::models::table::MotionTable;
use crate::engine::error::EngineError;
use crate::engine::query::MotionQuery;
use std::path::Path;
use tracing::{info, instrument};

/// Relative and absolute motion of one joint.
#[derive(Debug, Clone, PartialEq)]
pub struct JointMotion {
    pub joint: String,
    /// The joint followed by its ancestors up to the root.
    pub path: Vec<String>,
    pub relative: MotionTable,
    pub absolute: MotionTable,
}

impl JointMotion {
    /// Writes `{stem}_relative.csv` and `{stem}_absolute.csv` into `dir`.
    pub fn export_csv(&self, dir: &Path, stem: &str) -> Result<(), EngineError> {
        write_csv_path(&self.relative, &dir.join(format!("{stem}_relative.csv")))?;
        write_csv_path(&self.absolute, &dir.join(format!("{stem}_absolute.csv")))?;
        Ok(())
    }
}

/// Reads the file at `path` and derives the motion of `joint`.
#[instrument(skip_all, name = "joint_motion_workflow", fields(joint = joint))]
pub fn run(path: &Path, joint: &str, config: &ParseConfig) -> Result<JointMotion, EngineError> {
    info!("Reading motion capture from '{}'.", path.display());
    let (skeleton, table) = BvhFile::read_from_path(path, config)?;
    analyze(&skeleton, &table, joint)
}

/// Derives the motion of `joint` from an already parsed skeleton and table.
pub fn analyze(
    skeleton: &Skeleton,
    table: &MotionTable,
    joint: &str,
) -> Result<JointMotion, EngineError> {
    let query = MotionQuery::new(skeleton, table);
    let path = skeleton
        .path_to_root(joint)?
        .into_iter()
        .map(str::to_string)
        .collect();
    let relative = query.relative_motion(joint)?;
    let absolute = query.absolute_motion(joint)?;
    info!(
        frames = table.frame_count(),
        "Derived relative and absolute motion for '{}'.", joint
    );
    Ok(JointMotion {
        joint: joint.to_string(),
        path,
        relative,
        absolute,
    })
}
