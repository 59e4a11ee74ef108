//! GeneralizedTime encoding.

use time::{OffsetDateTime, UtcOffset};

use super::der::{DerBuilder, DerEncode, Header, Tag};
use crate::error::DerCertError;

/// The fixed end date for a validity period with no well-defined end (RFC 5280 §4.1.2.5).
pub const NO_WELL_DEFINED_EXPIRATION: &str = "99991231235959Z";

/// `YYYYMMDDHHMMSSZ`
const GENERALIZED_TIME_LEN: usize = 15;

/// A GeneralizedTime value rendered in UTC with whole seconds.
///
/// Only built through [`GeneralizedTime::at`], [`GeneralizedTime::try_at`] or
/// [`GeneralizedTime::indefinite`], so every value renders as exactly 15
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralizedTime(Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repr {
    /// Always held in UTC.
    At(OffsetDateTime),
    Indefinite,
}

impl GeneralizedTime {
    /// Panics if the instant falls outside years 0 to 9999, which cannot be
    /// written with four digits.
    pub fn at(instant: OffsetDateTime) -> Self {
        match Self::try_at(instant) {
            Ok(time) => time,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`GeneralizedTime::at`], but reports an out-of-range year as an error.
    pub fn try_at(instant: OffsetDateTime) -> Result<Self, DerCertError> {
        let utc = instant.to_offset(UtcOffset::UTC);
        let year = utc.year();
        if !(0..=9999).contains(&year) {
            return Err(DerCertError::InvalidInput(format!(
                "GeneralizedTime year out of range: {year}"
            )));
        }
        Ok(GeneralizedTime(Repr::At(utc)))
    }

    /// No well-defined end; encodes as [`NO_WELL_DEFINED_EXPIRATION`].
    pub fn indefinite() -> Self {
        GeneralizedTime(Repr::Indefinite)
    }

    /// The instant, or `None` for the indefinite sentinel.
    pub fn instant(&self) -> Option<OffsetDateTime> {
        match self.0 {
            Repr::At(instant) => Some(instant),
            Repr::Indefinite => None,
        }
    }

    /// The 15 ASCII characters written as content.
    ///
    /// Built from numeric fields with `format!`, so neither host locale nor
    /// local timezone has any influence on the output.
    pub fn to_der_string(&self) -> String {
        match self.0 {
            Repr::At(utc) => format!(
                "{:04}{:02}{:02}{:02}{:02}{:02}Z",
                utc.year(),
                u8::from(utc.month()),
                utc.day(),
                utc.hour(),
                utc.minute(),
                utc.second()
            ),
            Repr::Indefinite => NO_WELL_DEFINED_EXPIRATION.to_string(),
        }
    }
}

impl DerEncode for GeneralizedTime {
    fn header(&self) -> Header {
        Header::primitive(Tag::GeneralizedTime, GENERALIZED_TIME_LEN)
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        let rendered = self.to_der_string();
        debug_assert_eq!(rendered.len(), GENERALIZED_TIME_LEN);
        builder.extend_from_slice(rendered.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn test_utc_instant() {
        let time = GeneralizedTime::at(datetime!(2001-01-01 00:00:00 UTC));
        assert_eq!(time.to_der_string(), "20010101000000Z");

        let der = time.to_der();
        assert_eq!(&der[..2], [0x18, 0x0F]);
        assert_eq!(&der[2..], b"20010101000000Z");
    }

    #[test]
    fn test_offset_input_is_rendered_in_utc() {
        // 01:30 at +02:00 is 23:30 UTC on the previous day.
        let time = GeneralizedTime::at(datetime!(2024-03-01 01:30:45 +2));
        assert_eq!(time.to_der_string(), "20240229233045Z");

        let same_instant = datetime!(2024-02-29 23:30:45 UTC).to_offset(offset!(-8));
        assert_eq!(GeneralizedTime::at(same_instant).to_der(), time.to_der());
    }

    #[test]
    fn test_fractional_seconds_are_dropped() {
        let time = GeneralizedTime::at(datetime!(2030-12-31 23:59:59.999 UTC));
        assert_eq!(time.to_der_string(), "20301231235959Z");
    }

    #[test]
    fn test_small_years_are_zero_padded() {
        let time = GeneralizedTime::at(datetime!(999-05-06 7:08:09 UTC));
        assert_eq!(time.to_der_string(), "09990506070809Z");
    }

    #[test]
    fn test_indefinite_sentinel() {
        let der = GeneralizedTime::indefinite().to_der();
        assert_eq!(&der[..2], [0x18, 0x0F]);
        assert_eq!(&der[2..], b"99991231235959Z");
        assert_eq!(GeneralizedTime::indefinite().instant(), None);
    }

    #[test]
    fn test_negative_year_is_rejected() {
        let err = GeneralizedTime::try_at(datetime!(-0005-01-01 0:00 UTC)).unwrap_err();
        assert!(matches!(err, DerCertError::InvalidInput(_)));
    }

    #[test]
    fn test_offset_can_push_year_out_of_range() {
        // 9999-12-31 23:30 at -01:00 is already year 10000 in UTC.
        assert!(GeneralizedTime::try_at(datetime!(9999-12-31 23:30 -1)).is_err());
        assert!(GeneralizedTime::try_at(datetime!(9999-12-31 23:30 UTC)).is_ok());
    }

    #[test]
    #[should_panic(expected = "year out of range")]
    fn test_at_panics_on_negative_year() {
        GeneralizedTime::at(datetime!(-0001-12-31 23:59:59 UTC));
    }

    #[test]
    fn test_instant_is_held_in_utc() {
        let time = GeneralizedTime::at(datetime!(2024-03-01 01:30:45 +2));
        assert_eq!(time.instant(), Some(datetime!(2024-02-29 23:30:45 UTC)));
        assert_eq!(time.instant().map(|t| t.offset()), Some(UtcOffset::UTC));
    }
}
