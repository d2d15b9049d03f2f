// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use chrono::{Datelike, NaiveDateTime, Timelike};

/// A date and time stored as per the MS-DOS representation used by ZIP files.
///
/// The low 16 bits hold the time (two-second granularity), the high 16 bits
/// the date (years counted from 1980). Conversion takes wall-clock
/// components as supplied; no timezone adjustment is applied.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ZipDateTime {
    pub(crate) date: u16,
    pub(crate) time: u16,
}

impl ZipDateTime {
    /// Returns the year of this date & time.
    pub fn year(&self) -> i32 {
        (((self.date & 0xFE00) >> 9) + 1980).into()
    }

    /// Returns the month of this date & time.
    pub fn month(&self) -> u32 {
        ((self.date & 0x1E0) >> 5).into()
    }

    /// Returns the day of this date & time.
    pub fn day(&self) -> u32 {
        (self.date & 0x1F).into()
    }

    /// Returns the hour of this date & time.
    pub fn hour(&self) -> u32 {
        ((self.time & 0xF800) >> 11).into()
    }

    /// Returns the minute of this date & time.
    pub fn minute(&self) -> u32 {
        ((self.time & 0x7E0) >> 5).into()
    }

    /// Returns the second of this date & time.
    ///
    /// Note that MS-DOS has a maximum granularity of two seconds.
    pub fn second(&self) -> u32 {
        ((self.time & 0x1F) << 1).into()
    }

    /// The combined 32-bit value: DOS date in the high half, DOS time in the
    /// low half, as the two consecutive little-endian header fields read it.
    pub fn as_u32(&self) -> u32 {
        ((self.date as u32) << 16) | self.time as u32
    }
}

impl From<ZipDateTimeBuilder> for ZipDateTime {
    fn from(builder: ZipDateTimeBuilder) -> Self {
        builder.0
    }
}

impl From<&NaiveDateTime> for ZipDateTime {
    fn from(value: &NaiveDateTime) -> Self {
        let mut builder = ZipDateTimeBuilder::new();

        builder = builder.year(value.year());
        builder = builder.month(value.month());
        builder = builder.day(value.day());
        builder = builder.hour(value.hour());
        builder = builder.minute(value.minute());
        builder = builder.second(value.second());

        builder.build()
    }
}

impl From<NaiveDateTime> for ZipDateTime {
    fn from(value: NaiveDateTime) -> Self {
        (&value).into()
    }
}

/// A builder for [`ZipDateTime`].
pub struct ZipDateTimeBuilder(pub(crate) ZipDateTime);

impl From<ZipDateTime> for ZipDateTimeBuilder {
    fn from(date: ZipDateTime) -> Self {
        Self(date)
    }
}

impl Default for ZipDateTimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipDateTimeBuilder {
    pub fn new() -> Self {
        Self(ZipDateTime { date: 0, time: 0 })
    }

    /// Sets the date and time's year.
    ///
    /// Years before 1980 are not representable and clamp to 1980.
    pub fn year(mut self, year: i32) -> Self {
        let year = ((year.max(1980) - 1980) << 9) & 0xFE00;
        self.0.date |= year as u16;
        self
    }

    /// Sets the date and time's month.
    pub fn month(mut self, month: u32) -> Self {
        self.0.date |= ((month << 5) & 0x1E0) as u16;
        self
    }

    /// Sets the date and time's day.
    pub fn day(mut self, day: u32) -> Self {
        self.0.date |= (day & 0x1F) as u16;
        self
    }

    /// Sets the date and time's hour.
    pub fn hour(mut self, hour: u32) -> Self {
        self.0.time |= ((hour << 11) & 0xF800) as u16;
        self
    }

    /// Sets the date and time's minute.
    pub fn minute(mut self, minute: u32) -> Self {
        self.0.time |= ((minute << 5) & 0x7E0) as u16;
        self
    }

    /// Sets the date and time's second.
    ///
    /// Note that MS-DOS has a maximum granularity of two seconds; the value
    /// is rounded down to the nearest even second.
    pub fn second(mut self, second: u32) -> Self {
        self.0.time |= ((second >> 1) & 0x1F) as u16;
        self
    }

    /// Consumes this builder and returns a final [`ZipDateTime`].
    pub fn build(self) -> ZipDateTime {
        self.into()
    }
}
