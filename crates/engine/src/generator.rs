use numgen_db::session::StoreSession;
use numgen_format::FormatCache;
use tracing::*;

use crate::{
    GenerateError, OutOfTransactionGenerator, RetrySequenceGenerator, SequenceGenerator,
};

/// Facade over the generation pipeline: issue a value from the sequence,
/// render it through the pattern formatter, and concatenate prefix and
/// suffix parts.  Compiled patterns are cached per pattern string.
#[derive(Debug)]
pub struct NumberGenerator<G> {
    generator: G,
    formats: FormatCache,
}

impl NumberGenerator<OutOfTransactionGenerator<RetrySequenceGenerator>> {
    /// The production chain: out-of-transaction isolation wrapping the
    /// retrying increment engine with default policy.
    pub fn with_default_stack() -> Self {
        Self::new(OutOfTransactionGenerator::new(
            RetrySequenceGenerator::default(),
        ))
    }
}

impl<G: SequenceGenerator> NumberGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            formats: FormatCache::new(),
        }
    }

    /// Issues the next number of `name` and returns its rendered text.
    ///
    /// An omitted or empty pattern renders the plain decimal value.
    /// Prefix and suffix parts are concatenated verbatim, in order,
    /// around the rendered number.  On any failure nothing is returned;
    /// the issued value stays consumed either way, since the increment
    /// commits before rendering.
    pub fn generate(
        &self,
        session: &dyn StoreSession,
        name: &str,
        pattern: Option<&str>,
        prefix: &[String],
        suffix: &[String],
    ) -> Result<String, GenerateError> {
        let number = self.generator.next_value(session, name)?;
        let rendered = match pattern {
            Some(pattern) if !pattern.is_empty() => self.formats.get(pattern).apply(number)?,
            _ => number.to_string(),
        };
        debug!(%name, number, "generated sequence number");

        let mut out = String::new();
        for part in prefix {
            out.push_str(part);
        }
        out.push_str(&rendered);
        for part in suffix {
            out.push_str(part);
        }
        Ok(out)
    }
}
