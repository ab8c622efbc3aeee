//! Positional number formatting for generated sequence values.
//!
//! A pattern maps the decimal digits of a number onto fixed positions:
//!
//! - `0` emits the digit at that position, or `0` if the number is too
//!   short to reach it.
//! - `#` emits the digit at that position, or nothing.
//! - `?X` emits the digit at that position, or the literal `X`.
//! - `\X` escapes any character, including `0`, `#`, `?` and `\`.
//! - Anything else is literal text; literal runs after a `#` position are
//!   suppressed unless some earlier position actually produced a digit.
//!
//! So `###-###-#` renders 1 as `1` and 1234 as `123-4`, while `000-000-0`
//! renders 1 as `000-000-1`.

mod cache;
mod pattern;

pub use cache::FormatCache;
pub use pattern::{FormatError, NumberFormat};
