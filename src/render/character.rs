use core::fmt;

/// 可显示的字符：数字或固定的中文数词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayCharacter {
    Digit(u8),
    /// 十
    Ten,
    /// 万
    TenThousand,
}

impl DisplayCharacter {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Self::Digit(d as u8)),
            '十' => Some(Self::Ten),
            '万' => Some(Self::TenThousand),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Digit(d) => char::from(b'0' + d % 10),
            Self::Ten => '十',
            Self::TenThousand => '万',
        }
    }
}

impl fmt::Display for DisplayCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// 显示类别，决定格式化规则和缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayCategory {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Week,
    Countdown,
    Ten1,
    Ten2,
    Wan,
}

impl DisplayCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Week => "week",
            Self::Countdown => "countdown",
            Self::Ten1 => "ten1",
            Self::Ten2 => "ten2",
            Self::Wan => "wan",
        }
    }

    /// 时分秒固定补零到两位
    pub fn is_zero_padded(self) -> bool {
        matches!(self, Self::Hour | Self::Minute | Self::Second)
    }
}

/// 渲染位置：类别 + 位序，仅用作缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplaySlot {
    pub category: DisplayCategory,
    pub index: usize,
}

impl DisplaySlot {
    pub const fn new(category: DisplayCategory, index: usize) -> Self {
        Self { category, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digits_and_literals() {
        assert_eq!(DisplayCharacter::from_char('0'), Some(DisplayCharacter::Digit(0)));
        assert_eq!(DisplayCharacter::from_char('9'), Some(DisplayCharacter::Digit(9)));
        assert_eq!(DisplayCharacter::from_char('十'), Some(DisplayCharacter::Ten));
        assert_eq!(DisplayCharacter::from_char('万'), Some(DisplayCharacter::TenThousand));
        assert_eq!(DisplayCharacter::from_char('a'), None);
        assert_eq!(DisplayCharacter::from_char('-'), None);
    }

    #[test]
    fn prints_back_the_source_character() {
        for c in ['0', '5', '9', '十', '万'] {
            let parsed = DisplayCharacter::from_char(c).unwrap();
            assert_eq!(parsed.as_char(), c);
            assert_eq!(parsed.to_string(), c.to_string());
        }
    }

    #[test]
    fn slots_differ_by_category() {
        let hour = DisplaySlot::new(DisplayCategory::Hour, 0);
        let minute = DisplaySlot::new(DisplayCategory::Minute, 0);
        assert_ne!(hour, minute);
    }
}
