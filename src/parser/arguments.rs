//! Argument splitting and decoding for operation strings.
//!
//! The raw argument blob between the call's parentheses is split into
//! top-level comma-separated segments, then each segment is decoded as a
//! JSON value. A comma only delimits when brace depth, bracket depth, and
//! string state are all neutral, so commas inside objects, arrays, and
//! strings stay inside their segment. Segment order is positional argument
//! order.

use serde_json::Value;

use crate::error::{ParseError, Result};

/// Split an argument blob into top-level comma-separated segments.
///
/// A blank blob yields zero segments. String state is tracked locally in
/// this single pass with the same single-backslash escape rule as the
/// boundary tracker. The final segment is appended only when non-blank;
/// intermediate segments are kept verbatim so that `a,,b` surfaces a
/// decode error for the empty middle segment instead of silently
/// shifting argument positions.
///
/// Fails with [`ParseError::UnbalancedStructure`] when brace or bracket
/// depth is nonzero at the end of the scan.
pub(crate) fn split_arguments(args_blob: &str) -> Result<Vec<String>> {
    if args_blob.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = args_blob.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut brace_depth: i64 = 0;
    let mut bracket_depth: i64 = 0;
    let mut inside_string = false;
    let mut open_quote = '\0';

    for i in 0..chars.len() {
        let ch = chars[i];
        let escaped = i > 0 && chars[i - 1] == '\\';

        if inside_string {
            if ch == open_quote && !escaped {
                inside_string = false;
            }
            current.push(ch);
            continue;
        }

        match ch {
            '\'' | '"' if !escaped => {
                inside_string = true;
                open_quote = ch;
                current.push(ch);
            }
            '{' => {
                brace_depth += 1;
                current.push(ch);
            }
            '}' => {
                brace_depth -= 1;
                current.push(ch);
            }
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                bracket_depth -= 1;
                current.push(ch);
            }
            ',' if brace_depth == 0 && bracket_depth == 0 => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    if brace_depth != 0 || bracket_depth != 0 {
        return Err(ParseError::UnbalancedStructure {
            braces: brace_depth,
            brackets: bracket_depth,
        }
        .into());
    }

    if !current.trim().is_empty() {
        segments.push(current);
    }

    Ok(segments)
}

/// Decode each segment as a strict JSON value, preserving order.
pub(crate) fn decode_segments(segments: &[String]) -> Result<Vec<Value>> {
    segments.iter().map(|s| decode_segment(s)).collect()
}

/// Decode one trimmed segment, citing the segment text on failure.
fn decode_segment(segment: &str) -> Result<Value> {
    let trimmed = segment.trim();
    serde_json::from_str(trimmed).map_err(|e| {
        ParseError::ArgumentDecode {
            segment: trimmed.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
