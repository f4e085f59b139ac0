use time::format_description::OwnedFormatItem;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::{Error, Timestamp};

/// Shortens a legacy doubled UTC designator.
///
/// Pattern lists inherited from the old configuration convention wrote the
/// trailing UTC designator twice (`...ZZ`). The format-description syntax
/// wants the single literal `Z`, so one trailing character is dropped before
/// the pattern is applied. Patterns without the doubled suffix pass through
/// untouched.
pub(crate) fn normalize_pattern(pattern: &str) -> &str {
    if pattern.ends_with("ZZ") {
        &pattern[..pattern.len() - 1]
    } else {
        pattern
    }
}

/// Parses `input` by trying each pattern in declared order.
///
/// The first pattern that matches wins; later patterns are never consulted
/// for disambiguation. A malformed pattern string is reported immediately as
/// [`Error::InvalidPattern`] rather than skipped, since a bad configuration
/// should not be masked by a happier pattern earlier in the list. If every
/// pattern fails to match, the original input is returned inside
/// [`Error::Parse`].
pub(crate) fn parse_with<S: AsRef<str>>(input: &str, patterns: &[S]) -> Result<Timestamp, Error> {
    for pattern in patterns {
        let format = crate::format::compile(normalize_pattern(pattern.as_ref()))?;

        if let Some(ts) = try_parse(input, &format) {
            return Ok(ts);
        }
    }

    Err(Error::parse_failure(input))
}

/// Applies one compiled pattern, resolving whatever components it captured.
///
/// A pattern may describe an offset-bearing datetime, a plain datetime, or a
/// bare date. Offsets are applied during parsing, normalizing the result to
/// UTC; a date without time components resolves to midnight.
fn try_parse(input: &str, format: &OwnedFormatItem) -> Option<Timestamp> {
    if let Ok(odt) = OffsetDateTime::parse(input, format) {
        return Some(Timestamp::from(odt));
    }

    if let Ok(pdt) = PrimitiveDateTime::parse(input, format) {
        return Some(Timestamp::from(pdt));
    }

    if let Ok(date) = Date::parse(input, format) {
        return Some(Timestamp::from(date.midnight()));
    }

    None
}
