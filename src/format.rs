use time::format_description::{self, OwnedFormatItem};
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::{Error, Timestamp};

/// Compiles a pattern string into a format description.
///
/// Compilation is done per call; the resulting item is transient and never
/// shared, so concurrent callers cannot trample each other's state.
pub(crate) fn compile(pattern: &str) -> Result<OwnedFormatItem, Error> {
    Ok(format_description::parse_owned::<2>(pattern)?)
}

/// Rendering through a runtime format pattern.
///
/// Implemented for both plain timestamps and offset-bearing values, so a
/// single formatting entry point serves either representation. The pattern is
/// applied verbatim; a placeholder the value cannot supply (such as an offset
/// component on a [`Timestamp`]) surfaces as [`Error::Format`].
pub trait FormatWith {
    /// Renders `self` using the given pattern string.
    fn format_with(&self, pattern: &str) -> Result<String, Error>;
}

macro_rules! impl_format_with {
    ($($t:ty),* $(,)?) => {$(
        impl FormatWith for $t {
            fn format_with(&self, pattern: &str) -> Result<String, Error> {
                let format = compile(pattern)?;
                Ok(self.format(&format)?)
            }
        }
    )*};
}

// `Timestamp` picks up `PrimitiveDateTime::format` through Deref.
impl_format_with!(Timestamp, OffsetDateTime, PrimitiveDateTime, Date);
