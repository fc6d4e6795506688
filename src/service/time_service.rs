// src/service/time_service.rs

//! 时间服务模块 - 从时间源读取一次时间并派生所有显示字段
//!
//! 每次采样只读取一次时钟，所有字段都是这一次读数的纯函数。

use core::fmt::Write;

use jiff::Zoned;
use jiff::civil::Date;

use crate::common::error::{AppError, Result};
use crate::driver::time_source::TimeSource;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// 星期名称，以周日为0
pub fn get_weekday_name(weekday: u8) -> &'static str {
    const WEEK_NAMES: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];
    WEEK_NAMES[weekday as usize % 7]
}

/// 距离明年1月1日零点的天数，向上取整
pub fn days_until_next_year(now: &Zoned) -> Result<u32> {
    let next_year = now.year().checked_add(1).ok_or(AppError::TimeError)?;
    let new_year = Date::new(next_year, 1, 1)?.to_zoned(now.time_zone().clone())?;

    let remaining_ms = new_year.timestamp().as_millisecond() - now.timestamp().as_millisecond();
    let days = (remaining_ms + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY);
    u32::try_from(days).map_err(|_| AppError::TimeError)
}

/// 一次时钟读数派生出的显示字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// 周日为0的星期序号
    pub weekday: u8,
    pub days_remaining: u32,
}

impl ClockSnapshot {
    pub fn from_zoned(now: &Zoned) -> Result<Self> {
        let year = u16::try_from(now.year()).map_err(|_| AppError::TimeError)?;

        Ok(Self {
            year,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
            weekday: now.weekday().to_sunday_zero_offset() as u8,
            days_remaining: days_until_next_year(now)?,
        })
    }

    /// 显示用的星期数字：周一到周六为1..6，周日为7
    pub fn weekday_number(&self) -> u8 {
        if self.weekday == 0 { 7 } else { self.weekday }
    }

    /// 星期的中文名称
    pub fn weekday_label(&self) -> &'static str {
        get_weekday_name(self.weekday)
    }

    /// 生成用于判断是否需要重绘的指纹
    pub fn fingerprint(&self) -> Result<RenderFingerprint> {
        let mut text = heapless::String::new();
        write!(
            text,
            "{}{:02}{:02}{:02}{:02}{:02}{}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.weekday_number()
        )
        .map_err(|_| AppError::TimeError)?;
        Ok(RenderFingerprint(text))
    }
}

/// 所有数值字段拼接成的指纹，按值比较
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFingerprint(heapless::String<24>);

impl RenderFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 时间服务，提供时钟采样
pub struct TimeService<T: TimeSource> {
    time_source: T,
}

impl<T: TimeSource> TimeService<T> {
    pub fn new(time_source: T) -> Self {
        Self { time_source }
    }

    /// 读取时钟并派生显示字段
    pub fn sample(&self) -> Result<ClockSnapshot> {
        let now = self.time_source.now()?;
        ClockSnapshot::from_zoned(&now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    fn at(y: i16, mo: i8, d: i8, h: i8, mi: i8, s: i8) -> Zoned {
        date(y, mo, d).at(h, mi, s, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    #[test]
    fn weekday_numbers_put_sunday_last() {
        // 2024-03-03 是周日，2024-03-06 是周三
        let sunday = ClockSnapshot::from_zoned(&at(2024, 3, 3, 12, 0, 0)).unwrap();
        assert_eq!(sunday.weekday_number(), 7);
        assert_eq!(sunday.weekday_label(), "日");

        let wednesday = ClockSnapshot::from_zoned(&at(2024, 3, 6, 12, 0, 0)).unwrap();
        assert_eq!(wednesday.weekday_number(), 3);
        assert_eq!(wednesday.weekday_label(), "三");
    }

    #[test]
    fn weekday_names_table() {
        assert_eq!(get_weekday_name(0), "日");
        assert_eq!(get_weekday_name(6), "六");
    }

    #[test]
    fn last_second_of_year_counts_one_day() {
        assert_eq!(days_until_next_year(&at(2023, 12, 31, 23, 59, 59)).unwrap(), 1);
    }

    #[test]
    fn new_year_midnight_counts_whole_year() {
        assert_eq!(days_until_next_year(&at(2023, 1, 1, 0, 0, 0)).unwrap(), 365);
        assert_eq!(days_until_next_year(&at(2024, 1, 1, 0, 0, 0)).unwrap(), 366);
        assert_eq!(days_until_next_year(&at(2024, 1, 1, 0, 0, 1)).unwrap(), 366);
    }

    #[test]
    fn countdown_uses_local_zone() {
        let tz = TimeZone::fixed(jiff::tz::offset(8));
        let now = date(2024, 12, 31).at(23, 0, 0, 0).to_zoned(tz).unwrap();
        assert_eq!(days_until_next_year(&now).unwrap(), 1);
    }

    #[test]
    fn snapshot_fields() {
        let snapshot = ClockSnapshot::from_zoned(&at(2024, 3, 5, 9, 7, 22)).unwrap();
        assert_eq!(
            (snapshot.year, snapshot.month, snapshot.day),
            (2024, 3, 5)
        );
        assert_eq!(
            (snapshot.hour, snapshot.minute, snapshot.second),
            (9, 7, 22)
        );
        assert_eq!(snapshot.weekday_number(), 2);
        assert_eq!(snapshot.weekday_label(), "二");
        assert_eq!(snapshot.days_remaining, 302);
    }

    #[test]
    fn fingerprint_changes_every_second() {
        let a = ClockSnapshot::from_zoned(&at(2024, 3, 5, 9, 7, 22)).unwrap();
        let b = ClockSnapshot::from_zoned(&at(2024, 3, 5, 9, 7, 23)).unwrap();
        assert_eq!(a.fingerprint().unwrap().as_str(), "202403050907222");
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap(), a.clone().fingerprint().unwrap());
    }
}
