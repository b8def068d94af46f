use super::error::{BvhError, BvhParseErrorKind};
use super::keywords;
use crate::core::models::builder::{SkeletonBuilder, SkeletonError};
use crate::core::models::channel::ChannelKind;
use crate::core::models::skeleton::Skeleton;
use nalgebra::Vector3;
use tracing::debug;

/// A whitespace-separated word of the hierarchy section and the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
}

/// The tokens of the hierarchy section plus the input that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchySection<'a> {
    pub tokens: Vec<Token<'a>>,
    /// Input after the line that closed the outermost block.
    pub remainder: &'a str,
    /// Line number of the first line of `remainder`.
    pub remainder_line: usize,
}

/// Splits the hierarchy section off the front of `text`.
///
/// Lines are consumed until the brace nesting, having gone positive at least once, returns to
/// zero at the end of a line.
pub fn tokenize_hierarchy(text: &str) -> Result<HierarchySection<'_>, BvhError> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut opened = false;
    let mut consumed = 0usize;
    let mut line_num = 0usize;

    for line in text.split_inclusive('\n') {
        line_num += 1;
        consumed += line.len();

        for word in line.split_whitespace() {
            match word {
                keywords::OPEN_BLOCK => {
                    depth += 1;
                    opened = true;
                }
                keywords::CLOSE_BLOCK => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        BvhError::at(line_num, BvhParseErrorKind::UnmatchedCloseBrace)
                    })?;
                }
                _ => {}
            }
            tokens.push(Token {
                text: word,
                line: line_num,
            });
        }

        if opened && depth == 0 {
            debug!(
                tokens = tokens.len(),
                last_line = line_num,
                "Hierarchy section tokenized."
            );
            return Ok(HierarchySection {
                tokens,
                remainder: &text[consumed..],
                remainder_line: line_num + 1,
            });
        }
    }

    if opened {
        Err(BvhError::at(
            line_num,
            BvhParseErrorKind::UnterminatedBlock { depth },
        ))
    } else {
        Err(BvhError::MissingRecord("hierarchy block with at least one joint".into()))
    }
}

/// An index cursor over an immutable token slice.
struct TokenCursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> TokenCursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map_or(0, |t| t.line)
    }
}

#[derive(Debug, Clone, Copy)]
enum Block<'a> {
    Joint(&'a str),
    EndSite { owner: &'a str },
}

/// Builds a [`Skeleton`] from the tokens produced by [`tokenize_hierarchy`].
pub fn build_skeleton(tokens: &[Token<'_>]) -> Result<Skeleton, BvhError> {
    let mut cursor = TokenCursor::new(tokens);
    let mut builder = SkeletonBuilder::new();
    let mut open: Vec<Block<'_>> = Vec::new();
    let mut pending: Option<Block<'_>> = None;

    while let Some(token) = cursor.next() {
        let line = token.line;
        let skeleton_err = |e: SkeletonError| BvhError::at(line, BvhParseErrorKind::Skeleton(e));

        if let Some(block) = pending {
            if token.text != keywords::OPEN_BLOCK {
                let name = match block {
                    Block::Joint(name) => name.to_string(),
                    Block::EndSite { .. } => "End Site".to_string(),
                };
                return Err(BvhError::at(
                    line,
                    BvhParseErrorKind::ExpectedOpenBrace {
                        name,
                        found: token.text.to_string(),
                    },
                ));
            }
        }

        match token.text {
            keywords::HIERARCHY if open.is_empty() => {}
            keywords::ROOT => {
                let name = expect_joint_name(&mut cursor, token)?;
                builder.add_joint(name, None).map_err(skeleton_err)?;
                pending = Some(Block::Joint(name));
            }
            keywords::JOINT => {
                let name = expect_joint_name(&mut cursor, token)?;
                let Some(Block::Joint(parent)) = open.last().copied() else {
                    return Err(BvhError::at(
                        line,
                        BvhParseErrorKind::MisplacedJoint {
                            name: name.to_string(),
                        },
                    ));
                };
                builder.add_joint(name, Some(parent)).map_err(skeleton_err)?;
                pending = Some(Block::Joint(name));
            }
            keywords::END => {
                match cursor.next() {
                    Some(t) if t.text == keywords::SITE => {}
                    other => {
                        return Err(BvhError::at(
                            line,
                            BvhParseErrorKind::UnexpectedToken {
                                token: other.map_or(keywords::END, |t| t.text).to_string(),
                            },
                        ));
                    }
                }
                let Some(Block::Joint(owner)) = open.last().copied() else {
                    return Err(BvhError::at(line, BvhParseErrorKind::MisplacedEndSite));
                };
                pending = Some(Block::EndSite { owner });
            }
            keywords::OPEN_BLOCK => {
                let block = pending
                    .take()
                    .ok_or_else(|| BvhError::at(line, BvhParseErrorKind::UnexpectedOpenBrace))?;
                open.push(block);
            }
            keywords::CLOSE_BLOCK => {
                open.pop()
                    .ok_or_else(|| BvhError::at(line, BvhParseErrorKind::UnmatchedCloseBrace))?;
            }
            keywords::OFFSET => {
                let offset = parse_offset(&mut cursor, line)?;
                match open.last() {
                    Some(Block::Joint(name)) => {
                        builder.set_offset(name, offset).map_err(skeleton_err)?;
                    }
                    Some(Block::EndSite { owner }) => {
                        builder.set_end_site(owner, offset).map_err(skeleton_err)?;
                    }
                    None => return Err(outside_block(line, keywords::OFFSET)),
                }
            }
            keywords::CHANNELS => {
                let channels = parse_channels(&mut cursor, line)?;
                match open.last() {
                    Some(Block::Joint(name)) => {
                        builder.set_channels(name, channels).map_err(skeleton_err)?;
                    }
                    Some(Block::EndSite { .. }) => {
                        return Err(BvhError::at(line, BvhParseErrorKind::ChannelsOnEndSite));
                    }
                    None => return Err(outside_block(line, keywords::CHANNELS)),
                }
            }
            other => {
                return Err(BvhError::at(
                    line,
                    BvhParseErrorKind::UnexpectedToken {
                        token: other.to_string(),
                    },
                ));
            }
        }
    }

    if pending.is_some() || !open.is_empty() {
        return Err(BvhError::at(
            cursor.last_line(),
            BvhParseErrorKind::UnterminatedBlock {
                depth: open.len() + usize::from(pending.is_some()),
            },
        ));
    }

    Ok(builder.build()?)
}

fn outside_block(line: usize, keyword: &str) -> BvhError {
    BvhError::at(
        line,
        BvhParseErrorKind::PropertyOutsideBlock {
            keyword: keyword.to_string(),
        },
    )
}

fn expect_joint_name<'a>(
    cursor: &mut TokenCursor<'_, 'a>,
    keyword: Token<'a>,
) -> Result<&'a str, BvhError> {
    match cursor.peek() {
        Some(token) if !keywords::is_reserved(token.text) => {
            cursor.next();
            Ok(token.text)
        }
        _ => Err(BvhError::at(
            keyword.line,
            BvhParseErrorKind::MissingJointName {
                keyword: keyword.text.to_string(),
            },
        )),
    }
}

fn parse_offset(cursor: &mut TokenCursor<'_, '_>, line: usize) -> Result<Vector3<f64>, BvhError> {
    let mut values = Vec::with_capacity(3);
    while let Some(value) = cursor.peek().and_then(|t| t.text.parse::<f64>().ok()) {
        cursor.next();
        values.push(value);
    }
    match values.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(BvhError::at(
            line,
            BvhParseErrorKind::InvalidOffsetArity {
                found: values.len(),
            },
        )),
    }
}

fn parse_channels(
    cursor: &mut TokenCursor<'_, '_>,
    line: usize,
) -> Result<Vec<ChannelKind>, BvhError> {
    let count_token = cursor.next().map_or("", |t| t.text);
    let declared: usize = count_token.parse().map_err(|_| {
        BvhError::at(
            line,
            BvhParseErrorKind::InvalidChannelCount {
                value: count_token.to_string(),
            },
        )
    })?;
    if declared > ChannelKind::ALL.len() {
        return Err(BvhError::at(
            line,
            BvhParseErrorKind::ChannelCountMismatch {
                declared,
                found: channel_tokens_ahead(cursor),
            },
        ));
    }

    let mut channels = Vec::with_capacity(declared);
    for found in 0..declared {
        let token = match cursor.peek() {
            Some(token) if !keywords::is_reserved(token.text) => token,
            _ => {
                return Err(BvhError::at(
                    line,
                    BvhParseErrorKind::ChannelCountMismatch { declared, found },
                ));
            }
        };
        cursor.next();
        let kind = token.text.parse::<ChannelKind>().map_err(|_| {
            BvhError::at(
                token.line,
                BvhParseErrorKind::UnknownChannelKind {
                    value: token.text.to_string(),
                },
            )
        })?;
        channels.push(kind);
    }

    let extra = channel_tokens_ahead(cursor);
    if extra > 0 {
        return Err(BvhError::at(
            line,
            BvhParseErrorKind::ChannelCountMismatch {
                declared,
                found: declared + extra,
            },
        ));
    }

    Ok(channels)
}

/// Number of consecutive channel names at the cursor, without consuming them.
fn channel_tokens_ahead(cursor: &TokenCursor<'_, '_>) -> usize {
    cursor.tokens[cursor.pos.min(cursor.tokens.len())..]
        .iter()
        .take_while(|t| t.text.parse::<ChannelKind>().is_ok())
        .count()
}
