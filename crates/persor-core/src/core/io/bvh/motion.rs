use super::error::{BvhError, BvhParseErrorKind};
use super::keywords;
use tracing::{debug, warn};

/// Raw contents of the motion section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionSection {
    /// Value of the `Frames:` line. Informational only.
    pub frame_count: Option<usize>,
    /// Value of the `Frame Time:` line, in seconds.
    pub frame_time: Option<f64>,
    /// Every sample of every frame, row-major. `None` marks a token that was not a number.
    pub samples: Vec<Option<f64>>,
    /// Number of tokens that could not be read as numbers.
    pub coerced: usize,
}

/// Reads frame count, frame time and the flat sample stream from the text following the
/// hierarchy section. `first_line` is the line number of the first line of `text`.
pub fn tokenize_motion(text: &str, first_line: usize) -> Result<MotionSection, BvhError> {
    let mut section = MotionSection::default();

    for (offset, line) in text.lines().enumerate() {
        let line_num = first_line + offset;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == keywords::MOTION {
            continue;
        }

        if let Some(value) = value_after(line, keywords::FRAME_COUNT) {
            let count = value.parse::<usize>().map_err(|_| {
                BvhError::at(
                    line_num,
                    BvhParseErrorKind::InvalidFrameCount {
                        value: value.to_string(),
                    },
                )
            })?;
            section.frame_count = Some(count);
        } else if let Some(value) = value_after(line, keywords::FRAME_TIME) {
            let time = value.parse::<f64>().map_err(|_| {
                BvhError::at(
                    line_num,
                    BvhParseErrorKind::InvalidFrameTime {
                        value: value.to_string(),
                    },
                )
            })?;
            section.frame_time = Some(time);
        } else {
            for token in trimmed.split_whitespace() {
                let sample = token.parse::<f64>().ok();
                if sample.is_none() {
                    debug!(line = line_num, token, "Sample is not a number; storing a gap.");
                    section.coerced += 1;
                }
                section.samples.push(sample);
            }
        }
    }

    if section.coerced > 0 {
        warn!(
            coerced = section.coerced,
            "Some motion samples could not be parsed and were stored as missing values."
        );
    }
    Ok(section)
}

fn value_after<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.split_once(keyword)
        .map(|(_, rest)| rest.split_whitespace().next().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_motion_reads_header_and_flat_samples() {
        let text = "MOTION\nFrames: 2\nFrame Time: 0.008333\n1 2 3\n4 5 6\n";
        let section = tokenize_motion(text, 10).unwrap();
        assert_eq!(section.frame_count, Some(2));
        assert_eq!(section.frame_time, Some(0.008333));
        assert_eq!(
            section.samples,
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)]
        );
        assert_eq!(section.coerced, 0);
    }

    #[test]
    fn tokenize_motion_turns_bad_tokens_into_gaps() {
        let text = "Frame Time: 0.1\n1.5 abc -2e1\n\n  7  \n";
        let section = tokenize_motion(text, 1).unwrap();
        assert_eq!(section.samples, vec![Some(1.5), None, Some(-20.0), Some(7.0)]);
        assert_eq!(section.coerced, 1);
        assert_eq!(section.frame_count, None);
    }

    #[test]
    fn tokenize_motion_rejects_malformed_header_values() {
        let result = tokenize_motion("MOTION\nFrames: many\n", 20);
        assert!(matches!(
            result,
            Err(BvhError::Parse {
                line: 21,
                kind: BvhParseErrorKind::InvalidFrameCount { .. }
            })
        ));
        let result = tokenize_motion("Frame Time:\n", 1);
        assert!(matches!(
            result,
            Err(BvhError::Parse {
                kind: BvhParseErrorKind::InvalidFrameTime { .. },
                ..
            })
        ));
    }

    #[test]
    fn tokenize_motion_without_frame_time_leaves_it_undefined() {
        let section = tokenize_motion("Frames: 1\n0 0 0\n", 1).unwrap();
        assert_eq!(section.frame_time, None);
        assert_eq!(section.samples.len(), 3);
    }
}
