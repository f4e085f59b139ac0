//! Multi-pattern timestamp conversion.
//!
//! This crate converts between three representations of a point in time: the
//! [`Timestamp`] instant type (a UTC wall-clock datetime), the offset-bearing
//! [`OffsetDateTime`] from the [`time`] crate, and strings shaped by runtime
//! format patterns.
//!
//! A [`PatternSet`] holds one or more patterns in `time`'s
//! [format-description syntax]. Parsing tries each pattern in declared order
//! and returns the first match; formatting always uses the *primary* pattern,
//! which is the first one configured.
//!
//! ```rust
//! use pattern_timestamp::PatternSet;
//!
//! let formats = PatternSet::new(["[year]/[month]/[day]", "[month]-[day]-[year]"]).unwrap();
//!
//! // Input only matches the second pattern.
//! let ts = formats.parse("03-15-2021").unwrap();
//!
//! // Output always uses the first pattern.
//! assert_eq!(formats.format(&ts).unwrap(), "2021/03/15");
//! ```
//!
//! A pattern may capture UTC-offset components, in which case the offset is
//! applied during parsing and the resulting [`Timestamp`] is normalized to
//! UTC. Patterns without time components resolve to midnight. For
//! compatibility with legacy pattern lists, a pattern ending in a doubled UTC
//! designator (`...ZZ`) is shortened by one character before parsing.
//!
//! ## Cargo features
//!
//! * `serde` (default)
//!     - `Serialize`/`Deserialize` for [`Timestamp`]: RFC 3339 strings in
//!       human-readable formats, `i64` milliseconds since the Unix epoch in
//!       binary formats.
//!
//! [format-description syntax]: https://time-rs.github.io/book/api/format-description.html

use core::fmt;
use core::ops::{Add, AddAssign, Deref, DerefMut, Sub, SubAssign};
use std::time::SystemTime;

use time::format_description::well_known::Rfc3339;
pub use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

mod error;
mod format;
mod parse;

pub use error::Error;
pub use format::FormatWith;

/// UTC timestamp with nanosecond precision, without an attached offset.
///
/// A `Deref`/`DerefMut` implementation is provided to gain access to the
/// inner [`PrimitiveDateTime`] object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    const PRIMITIVE_UNIX_EPOCH: PrimitiveDateTime = time::macros::datetime!(1970 - 01 - 01 00:00);

    /// Unix Epoch -- 1970-01-01 Midnight
    pub const UNIX_EPOCH: Self = Timestamp(Self::PRIMITIVE_UNIX_EPOCH);

    /// Get the current time, assuming UTC.
    #[inline]
    pub fn now_utc() -> Self {
        SystemTime::now().into()
    }

    /// Parse by trying each of the given patterns in order, returning the
    /// value produced by the first pattern that matches.
    ///
    /// Patterns use `time`'s format-description syntax; a trailing doubled
    /// UTC designator (`...ZZ`) is shortened by one character before the
    /// pattern is applied. If an offset is captured it is applied during
    /// parsing, normalizing the result to UTC.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] carrying the original input if no pattern matches,
    /// or [`Error::InvalidPattern`] if a pattern string is malformed.
    pub fn parse_with<S: AsRef<str>>(input: &str, patterns: &[S]) -> Result<Self, Error> {
        parse::parse_with(input, patterns)
    }

    /// Convert to an [`OffsetDateTime`] at the system's current local
    /// offset. The instant is unchanged; only its representation gains an
    /// offset.
    ///
    /// # Errors
    ///
    /// [`Error::Conversion`] if the local offset cannot be determined, which
    /// notably happens on Unix systems once a process has multiple threads.
    pub fn to_local(self) -> Result<OffsetDateTime, Error> {
        let offset = UtcOffset::current_local_offset()?;
        Ok(self.0.assume_utc().to_offset(offset))
    }

    /// Convert to an [`OffsetDateTime`] with the given offset. No timezone
    /// conversion is done; the wall-clock value is interpreted literally.
    #[inline(always)]
    pub const fn assume_offset(self, offset: UtcOffset) -> OffsetDateTime {
        self.0.assume_offset(offset)
    }

    /// Returns the amount of time elapsed from an earlier point in time.
    #[inline]
    pub fn duration_since(self, earlier: Self) -> Duration {
        self.0 - earlier.0
    }

    /// Computes `self + duration`, returning `None` if an overflow occurred.
    #[inline]
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add(duration) {
            Some(ts) => Some(Timestamp(ts)),
            None => None,
        }
    }

    /// Computes `self - duration`, returning `None` if an overflow occurred.
    #[inline]
    pub const fn checked_sub(self, duration: Duration) -> Option<Self> {
        match self.0.checked_sub(duration) {
            Some(ts) => Some(Timestamp(ts)),
            None => None,
        }
    }

    /// Computes `self + duration`, saturating value on overflow.
    #[inline]
    pub const fn saturating_add(self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_add(duration))
    }

    /// Computes `self - duration`, saturating value on overflow.
    #[inline]
    pub const fn saturating_sub(self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_sub(duration))
    }

    fn rfc3339(&self) -> Result<String, time::error::Format> {
        self.0.assume_utc().format(&Rfc3339)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Timestamp").field(&self.0).finish()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rfc3339() {
            Ok(formatted) => f.write_str(&formatted),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(ts: SystemTime) -> Self {
        Timestamp(match ts.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(dur) => Self::PRIMITIVE_UNIX_EPOCH + dur,
            Err(err) => Self::PRIMITIVE_UNIX_EPOCH - err.duration(),
        })
    }
}

impl From<Timestamp> for SystemTime {
    fn from(ts: Timestamp) -> Self {
        let dur = ts.duration_since(Timestamp::UNIX_EPOCH);

        if dur.is_negative() {
            SystemTime::UNIX_EPOCH - dur.unsigned_abs()
        } else {
            SystemTime::UNIX_EPOCH + dur.unsigned_abs()
        }
    }
}

/// Strips the offset wrapper, normalizing to UTC first so the instant is
/// preserved. This is the inverse of [`Timestamp::to_local`].
impl From<OffsetDateTime> for Timestamp {
    fn from(ts: OffsetDateTime) -> Self {
        let utc_datetime = ts.to_offset(UtcOffset::UTC);
        let date = utc_datetime.date();
        let time = utc_datetime.time();
        Timestamp(PrimitiveDateTime::new(date, time))
    }
}

impl From<PrimitiveDateTime> for Timestamp {
    #[inline]
    fn from(ts: PrimitiveDateTime) -> Self {
        Timestamp(ts)
    }
}

impl Deref for Timestamp {
    type Target = PrimitiveDateTime;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Timestamp {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> Add<T> for Timestamp
where
    PrimitiveDateTime: Add<T, Output = PrimitiveDateTime>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: T) -> Self::Output {
        Timestamp(self.0 + rhs)
    }
}

impl<T> Sub<T> for Timestamp
where
    PrimitiveDateTime: Sub<T, Output = PrimitiveDateTime>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: T) -> Self::Output {
        Timestamp(self.0 - rhs)
    }
}

impl<T> AddAssign<T> for Timestamp
where
    PrimitiveDateTime: AddAssign<T>,
{
    #[inline]
    fn add_assign(&mut self, rhs: T) {
        self.0 += rhs;
    }
}

impl<T> SubAssign<T> for Timestamp
where
    PrimitiveDateTime: SubAssign<T>,
{
    #[inline]
    fn sub_assign(&mut self, rhs: T) {
        self.0 -= rhs;
    }
}

/// An ordered, immutable set of format patterns.
///
/// The pattern at index 0 is the *primary* pattern and shapes every outbound
/// string conversion; parsing consults the whole list in order. The set never
/// holds fewer than one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Box<[Box<str>]>,
}

impl PatternSet {
    /// Constructs a set from an ordered sequence of patterns.
    ///
    /// # Errors
    ///
    /// [`Error::NoPatterns`] if the sequence is empty.
    pub fn new<I, S>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        let patterns: Box<[Box<str>]> = patterns.into_iter().map(Into::into).collect();

        if patterns.is_empty() {
            return Err(Error::NoPatterns);
        }

        Ok(PatternSet { patterns })
    }

    /// Constructs a set holding a single pattern, which is therefore also
    /// the primary pattern.
    pub fn single(pattern: impl Into<Box<str>>) -> Self {
        let pattern: Box<str> = pattern.into();

        PatternSet {
            patterns: Box::new([pattern]),
        }
    }

    /// The primary pattern, used for all formatting.
    #[inline]
    pub fn primary(&self) -> &str {
        &self.patterns[0]
    }

    /// All configured patterns, in the order parsing consults them.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| &**pattern)
    }

    /// Renders a [`Timestamp`] or [`OffsetDateTime`] using the primary
    /// pattern.
    ///
    /// # Errors
    ///
    /// Surfaces the underlying library's error if the primary pattern is
    /// malformed or requires a component the value cannot supply.
    pub fn format(&self, value: &impl FormatWith) -> Result<String, Error> {
        value.format_with(self.primary())
    }

    /// Parses an input string by trying every configured pattern in order.
    ///
    /// # Errors
    ///
    /// See [`Timestamp::parse_with`].
    pub fn parse(&self, input: &str) -> Result<Timestamp, Error> {
        parse::parse_with(input, &self.patterns)
    }

    /// Parses an input string, then views the result at the system's
    /// current local offset.
    ///
    /// # Errors
    ///
    /// Everything [`PatternSet::parse`] reports, plus [`Error::Conversion`]
    /// if the local offset cannot be determined.
    pub fn parse_local(&self, input: &str) -> Result<OffsetDateTime, Error> {
        self.parse(input)?.to_local()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{Deserialize, Deserializer, Error, Visitor};
    use serde::ser::{Serialize, Serializer};

    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    use super::Timestamp;

    impl Serialize for Timestamp {
        #[inline]
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            if serializer.is_human_readable() {
                match self.rfc3339() {
                    Ok(formatted) => serializer.serialize_str(&formatted),
                    Err(err) => Err(<S::Error as serde::ser::Error>::custom(err)),
                }
            } else {
                (self.duration_since(Timestamp::UNIX_EPOCH).whole_milliseconds() as i64).serialize(serializer)
            }
        }
    }

    const OUT_OF_RANGE: &str = "Milliseconds out of range";

    impl<'de> Deserialize<'de> for Timestamp {
        #[inline]
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            use core::fmt;

            struct TsVisitor;

            impl<'de> Visitor<'de> for TsVisitor {
                type Value = Timestamp;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("an RFC3339 timestamp")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: Error,
                {
                    match OffsetDateTime::parse(v, &Rfc3339) {
                        Ok(odt) => Ok(Timestamp::from(odt)),
                        Err(_) => Err(E::custom("Invalid Format")),
                    }
                }

                #[inline]
                fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
                where
                    E: Error,
                {
                    Timestamp::UNIX_EPOCH
                        .checked_add(time::Duration::milliseconds(v))
                        .ok_or_else(|| E::custom(OUT_OF_RANGE))
                }

                #[inline]
                fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
                where
                    E: Error,
                {
                    let seconds = v / 1000;
                    let nanoseconds = (v % 1_000) * 1_000_000;

                    Timestamp::UNIX_EPOCH
                        .checked_add(time::Duration::new(seconds as i64, nanoseconds as i32))
                        .ok_or_else(|| E::custom(OUT_OF_RANGE))
                }
            }

            deserializer.deserialize_any(TsVisitor)
        }
    }
}
