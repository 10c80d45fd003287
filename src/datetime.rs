use time::{Date, Month, PrimitiveDateTime, Time};

/// Decodes the packed DOS date and time words stored in a file record.
///
/// The date word holds `year - 1980` in bits 9..16, the month in bits 5..9
/// and the day in bits 0..5.  The time word holds the hour in bits 11..16,
/// the minute in bits 5..11 and half the second in bits 0..5.  Returns
/// `None` when the fields do not name a real calendar date and time of day.
pub(crate) fn datetime_from_bits(
    date_bits: u16,
    time_bits: u16,
) -> Option<PrimitiveDateTime> {
    let field = |word: u16, shift: u16, width: u16| -> u8 {
        ((word >> shift) & ((1 << width) - 1)) as u8
    };
    let month = Month::try_from(field(date_bits, 5, 4)).ok()?;
    let date = Date::from_calendar_date(
        1980 + i32::from(field(date_bits, 9, 7)),
        month,
        field(date_bits, 0, 5),
    )
    .ok()?;
    let time = Time::from_hms(
        field(time_bits, 11, 5),
        field(time_bits, 5, 6),
        2 * field(time_bits, 0, 5),
    )
    .ok()?;
    Some(PrimitiveDateTime::new(date, time))
}
