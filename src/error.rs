/// Error type for every fallible operation in this crate.
///
/// Parsing, formatting and offset conversion report distinct variants so
/// callers can tell a bad input string apart from a bad pattern or an
/// environment that cannot resolve its local offset.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A pattern list was constructed without any patterns.
    #[error("at least one format pattern is required")]
    NoPatterns,

    /// None of the configured patterns matched the input string.
    #[error("unable to parse date {input:?} at position {position}")]
    Parse {
        /// The original, unmodified input string.
        input: Box<str>,
        /// Offset into the input where parsing gave up. Always `0`: patterns
        /// are matched against the whole input, not incrementally.
        position: usize,
    },

    /// The local UTC offset could not be determined, so a timestamp could
    /// not be converted to an offset-bearing value.
    #[error("unable to convert timestamp to a local offset value: {0}")]
    Conversion(#[from] time::error::IndeterminateOffset),

    /// A pattern string was not a valid `time` format description.
    #[error("invalid format pattern: {0}")]
    InvalidPattern(#[from] time::error::InvalidFormatDescription),

    /// The underlying library could not render a value with the given
    /// pattern, e.g. an offset placeholder applied to an offset-less value.
    #[error("unable to format value: {0}")]
    Format(#[from] time::error::Format),
}

impl Error {
    pub(crate) fn parse_failure(input: &str) -> Self {
        Error::Parse {
            input: input.into(),
            position: 0,
        }
    }
}
