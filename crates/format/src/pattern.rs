use thiserror::Error;

const ESCAPE: char = '\\';
const NUMBER_OR_ZERO: char = '0';
const NUMBER_OR_PAD: char = '?';
const NUMBER_OR_NOTHING: char = '#';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The number has more decimal digits than the pattern has positions.
    #[error("the format pattern '{pattern}' can't represent the number {number}")]
    Overflow { pattern: String, number: i64 },
}

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatPart {
    /// Literal text run.  When `optional`, it renders only if an earlier
    /// digit position already produced a real digit.
    Constant { text: String, optional: bool },
    /// One digit position.  `pad` is emitted when the number has no digit
    /// at this position; `None` emits nothing.
    Digit { offset: usize, pad: Option<char> },
}

/// A compiled format pattern.  Compilation is pure and infallible;
/// rendering fails only on overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pattern: String,
    parts: Vec<FormatPart>,
    digit_positions: usize,
}

fn flush_constant(parts: &mut Vec<FormatPart>, buf: &mut String, optional: bool) {
    if !buf.is_empty() {
        parts.push(FormatPart::Constant {
            text: std::mem::take(buf),
            optional,
        });
    }
}

impl NumberFormat {
    /// Compiles `pattern` in a single left-to-right, escape-aware scan.
    pub fn compile(pattern: &str) -> Self {
        let mut parts = Vec::new();
        let mut buf = String::new();
        let mut digit_positions = 0;
        let mut escape = false;
        let mut next_is_pad = false;
        // Constant runs after the first `#` become suppressible.
        let mut seen_optional_digit = false;

        for c in pattern.chars() {
            if escape {
                buf.push(c);
                escape = false;
            } else if next_is_pad {
                flush_constant(&mut parts, &mut buf, seen_optional_digit);
                parts.push(FormatPart::Digit {
                    offset: digit_positions,
                    pad: Some(c),
                });
                digit_positions += 1;
                next_is_pad = false;
            } else {
                match c {
                    ESCAPE => escape = true,
                    NUMBER_OR_PAD => next_is_pad = true,
                    NUMBER_OR_NOTHING | NUMBER_OR_ZERO => {
                        flush_constant(&mut parts, &mut buf, seen_optional_digit);
                        if c == NUMBER_OR_NOTHING {
                            parts.push(FormatPart::Digit {
                                offset: digit_positions,
                                pad: None,
                            });
                            seen_optional_digit = true;
                        } else {
                            parts.push(FormatPart::Digit {
                                offset: digit_positions,
                                pad: Some('0'),
                            });
                        }
                        digit_positions += 1;
                    }
                    _ => buf.push(c),
                }
            }
        }
        flush_constant(&mut parts, &mut buf, seen_optional_digit);

        Self {
            pattern: pattern.to_string(),
            parts,
            digit_positions,
        }
    }

    /// Number of digit positions in the pattern.
    pub fn digit_positions(&self) -> usize {
        self.digit_positions
    }

    /// The source pattern this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Renders `number` against the pattern.
    ///
    /// Fails with [`FormatError::Overflow`] before emitting anything if the
    /// decimal text of `number` is longer than the pattern's digit
    /// positions.
    pub fn apply(&self, number: i64) -> Result<String, FormatError> {
        let text = number.to_string();
        let len = text.len();
        if len > self.digit_positions {
            return Err(FormatError::Overflow {
                pattern: self.pattern.clone(),
                number,
            });
        }

        let digits = text.as_bytes();
        let mut out = String::new();
        // Count of positions that produced a real digit so far; gates
        // optional constants.
        let mut at_digit = 0usize;

        for part in &self.parts {
            match part {
                FormatPart::Constant { text, optional } => {
                    if !optional || at_digit > 0 {
                        out.push_str(text);
                    }
                }
                FormatPart::Digit { offset, pad } => {
                    // Absolute position of this slot in the number text.
                    let position = len as i64 - (self.digit_positions - offset) as i64;
                    if position >= 0 {
                        out.push(digits[position as usize] as char);
                        at_digit += 1;
                    } else if let Some(pad) = pad {
                        out.push(*pad);
                    }
                }
            }
        }
        Ok(out)
    }
}
