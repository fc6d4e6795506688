// src/driver/time_source.rs
use std::cell::RefCell;
use std::rc::Rc;

use jiff::Zoned;

use crate::common::error::Result;

pub trait TimeSource {
    /// 读取一次当前本地时间（含时区）
    fn now(&self) -> Result<Zoned>;
}

/// 系统时钟，使用主机本地时区
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Result<Zoned> {
        Ok(Zoned::now())
    }
}

/// 固定时间源 - 模拟器和测试使用
///
/// 克隆出的句柄共享同一个时间，可在外部推进时间。
#[derive(Debug, Clone)]
pub struct FixedTimeSource {
    now: Rc<RefCell<Zoned>>,
}

impl FixedTimeSource {
    pub fn new(now: Zoned) -> Self {
        Self {
            now: Rc::new(RefCell::new(now)),
        }
    }

    /// 设置当前时间
    pub fn set(&self, now: Zoned) {
        *self.now.borrow_mut() = now;
    }

    /// 将时间推进若干秒
    pub fn advance_seconds(&self, seconds: i64) -> Result<()> {
        let next = self.now.borrow().checked_add(jiff::Span::new().seconds(seconds))?;
        self.set(next);
        Ok(())
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Result<Zoned> {
        Ok(self.now.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    #[test]
    fn fixed_source_is_shared_between_clones() {
        let start = date(2024, 3, 5).at(9, 7, 22, 0).to_zoned(TimeZone::UTC).unwrap();
        let source = FixedTimeSource::new(start);
        let handle = source.clone();

        handle.advance_seconds(38).unwrap();
        let now = source.now().unwrap();
        assert_eq!((now.hour(), now.minute(), now.second()), (9, 8, 0));
    }
}
