use super::error::QueryError;
use super::skeleton::ChannelLayout;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the derived column holding the timestamp of each frame.
pub const TIME_COLUMN: &str = "time";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableBuildError {
    #[error("Channel layout is empty; the skeleton declares no channels")]
    EmptyChannelLayout,
    #[error("Frame time is undefined")]
    UndefinedFrameTime,
    #[error("Frame time must be a finite positive number (value: {0})")]
    InvalidFrameTime(f64),
}

/// A named column of per-frame values. `None` marks a missing sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// A pair of columns resolved into plottable points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x: String,
    pub y: String,
    pub points: Vec<(f64, f64)>,
}

/// Time-indexed motion samples with named columns.
///
/// Column 0 is always [`TIME_COLUMN`]; the remaining columns are named `"{joint}_{channel}"` in
/// channel layout order. Every column holds exactly [`frame_count`](Self::frame_count) values.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionTable {
    frame_time: f64,
    declared_frame_count: Option<usize>,
    columns: Vec<Column>,
    column_index: HashMap<String, usize>,
}

impl MotionTable {
    /// Reshapes a flat, row-major sample stream into a table laid out by `layout`.
    ///
    /// Samples are consumed in chunks of `layout.len()`. A trailing chunk that does not form a
    /// complete frame is discarded.
    ///
    /// # Errors
    ///
    /// Fails if the layout is empty or if the frame time is missing, non-finite or not positive.
    pub fn from_samples(
        layout: &ChannelLayout,
        frame_time: Option<f64>,
        samples: &[Option<f64>],
    ) -> Result<Self, TableBuildError> {
        let width = layout.len();
        if width == 0 {
            return Err(TableBuildError::EmptyChannelLayout);
        }
        let frame_time = frame_time.ok_or(TableBuildError::UndefinedFrameTime)?;
        if !frame_time.is_finite() || frame_time <= 0.0 {
            return Err(TableBuildError::InvalidFrameTime(frame_time));
        }

        let rows = samples.chunks_exact(width);
        let leftover = rows.remainder().len();
        if leftover > 0 {
            warn!(
                leftover,
                width, "Discarding trailing samples that do not form a complete frame."
            );
        }

        let frame_count = samples.len() / width;
        let mut value_columns: Vec<Vec<Option<f64>>> =
            vec![Vec::with_capacity(frame_count); width];
        for row in rows {
            for (column, &value) in value_columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        let mut columns = Vec::with_capacity(width + 1);
        columns.push(time_column(frame_count, frame_time));
        columns.extend(
            layout
                .iter()
                .zip(value_columns)
                .map(|(slot, values)| Column {
                    name: slot.column_name(),
                    values,
                }),
        );
        debug!(frames = frame_count, columns = columns.len(), "Built motion table.");

        Ok(Self::from_columns(frame_time, None, columns))
    }

    pub(crate) fn from_columns(
        frame_time: f64,
        declared_frame_count: Option<usize>,
        columns: Vec<Column>,
    ) -> Self {
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            frame_time,
            declared_frame_count,
            columns,
            column_index,
        }
    }

    pub fn with_declared_frame_count(mut self, declared: Option<usize>) -> Self {
        self.declared_frame_count = declared;
        self
    }

    /// Replaces the frame time and recomputes the time column.
    pub fn with_frame_time(mut self, frame_time: f64) -> Result<Self, TableBuildError> {
        if !frame_time.is_finite() || frame_time <= 0.0 {
            return Err(TableBuildError::InvalidFrameTime(frame_time));
        }
        let frames = self.frame_count();
        self.frame_time = frame_time;
        self.columns[0] = time_column(frames, frame_time);
        Ok(self)
    }

    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Number of complete frames stored in the table.
    pub fn frame_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Frame count announced by the `Frames:` line, if the input had one.
    pub fn declared_frame_count(&self) -> Option<usize> {
        self.declared_frame_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column_index
            .get(name)
            .map(|&idx| self.columns[idx].values.as_slice())
    }

    pub fn time(&self) -> &[Option<f64>] {
        &self.columns[0].values
    }

    /// Returns the values of frame `index` in column order, time first.
    pub fn row(&self, index: usize) -> Option<Vec<Option<f64>>> {
        if index >= self.frame_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }

    /// Returns a new table holding `time` plus the requested columns, each renamed.
    ///
    /// `selection` pairs an existing column name with the name it gets in the projection.
    pub fn project(&self, selection: &[(&str, &str)]) -> Result<MotionTable, QueryError> {
        let mut columns = Vec::with_capacity(selection.len() + 1);
        columns.push(self.columns[0].clone());
        for &(source, target) in selection {
            let values = self
                .column(source)
                .ok_or_else(|| QueryError::UnknownColumn(source.to_string()))?;
            columns.push(Column {
                name: target.to_string(),
                values: values.to_vec(),
            });
        }
        Ok(Self::from_columns(
            self.frame_time,
            self.declared_frame_count,
            columns,
        ))
    }

    /// Resolves `(x, y)` column pairs into point lists. Frames where either cell is missing are
    /// skipped.
    pub fn series(&self, pairs: &[(&str, &str)]) -> Result<Vec<Series>, QueryError> {
        pairs
            .iter()
            .map(|&(x, y)| {
                let xs = self
                    .column(x)
                    .ok_or_else(|| QueryError::UnknownColumn(x.to_string()))?;
                let ys = self
                    .column(y)
                    .ok_or_else(|| QueryError::UnknownColumn(y.to_string()))?;
                let points = xs
                    .iter()
                    .zip(ys)
                    .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                    .collect();
                Ok(Series {
                    x: x.to_string(),
                    y: y.to_string(),
                    points,
                })
            })
            .collect()
    }
}

fn time_column(frames: usize, frame_time: f64) -> Column {
    Column {
        name: TIME_COLUMN.to_string(),
        values: (0..frames).map(|i| Some(i as f64 * frame_time)).collect(),
    }
}
