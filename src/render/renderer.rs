//! 渲染器 - 将数值格式化并转换为逐字符的图片节点

use crate::common::error::{AppError, Result};
use crate::driver::rng::RandomIndex;
use crate::render::{
    COUNTDOWN_ELEMENT, DATE_ELEMENT, DigitImageResolver, DigitNode, DisplayCategory,
    DisplayCharacter, DisplayNode, DisplaySlot, DisplaySurface, LoadFailureHandler,
    LogLoadFailure, TIME_ELEMENT,
};
use crate::service::ClockSnapshot;

/// 固定字面量位置：两个“十”和一个“万”
const FIXED_LITERALS: [(DisplayCategory, DisplayCharacter); 3] = [
    (DisplayCategory::Ten1, DisplayCharacter::Ten),
    (DisplayCategory::Ten2, DisplayCharacter::Ten),
    (DisplayCategory::Wan, DisplayCharacter::TenThousand),
];

/// 按类别格式化数值：时分秒补零到两位，其余原样输出
pub fn format_value(value: u32, category: DisplayCategory) -> String {
    if category.is_zero_padded() {
        format!("{:02}", value)
    } else {
        value.to_string()
    }
}

pub struct Renderer<R: RandomIndex> {
    resolver: DigitImageResolver<R>,
    on_failure: Box<dyn LoadFailureHandler>,
}

impl<R: RandomIndex> Renderer<R> {
    pub fn new(resolver: DigitImageResolver<R>) -> Self {
        Self::with_failure_handler(resolver, Box::new(LogLoadFailure))
    }

    pub fn with_failure_handler(
        resolver: DigitImageResolver<R>,
        on_failure: Box<dyn LoadFailureHandler>,
    ) -> Self {
        Self {
            resolver,
            on_failure,
        }
    }

    /// 把数值转换为逐字符的图片节点
    pub fn render_number(
        &mut self,
        value: u32,
        category: DisplayCategory,
    ) -> Result<Vec<DisplayNode>> {
        format_value(value, category)
            .chars()
            .enumerate()
            .map(|(index, c)| {
                let character = DisplayCharacter::from_char(c).ok_or(AppError::InvalidCharacter(c))?;
                let image = self
                    .resolver
                    .resolve(character, DisplaySlot::new(category, index));
                Ok(DisplayNode::Digit(DigitNode::new(image, character, true)))
            })
            .collect()
    }

    /// 固定字面量位置只有一个不带外层span的图片
    pub fn render_literal(
        &mut self,
        character: DisplayCharacter,
        category: DisplayCategory,
    ) -> DisplayNode {
        let image = self
            .resolver
            .resolve(character, DisplaySlot::new(category, 0));
        DisplayNode::Digit(DigitNode::new(image, character, false))
    }

    /// 年月日和星期
    pub fn date_block(&mut self, snapshot: &ClockSnapshot) -> Result<Vec<DisplayNode>> {
        let mut nodes = self.render_number(snapshot.year as u32, DisplayCategory::Year)?;
        nodes.push(DisplayNode::text("年"));
        nodes.extend(self.render_number(snapshot.month as u32, DisplayCategory::Month)?);
        nodes.push(DisplayNode::text("月"));
        nodes.extend(self.render_number(snapshot.day as u32, DisplayCategory::Day)?);
        nodes.push(DisplayNode::text("日"));
        nodes.push(DisplayNode::text(" 星期"));
        nodes.extend(self.render_number(snapshot.weekday_number() as u32, DisplayCategory::Week)?);
        Ok(nodes)
    }

    pub fn time_block(&mut self, snapshot: &ClockSnapshot) -> Result<Vec<DisplayNode>> {
        let mut nodes = self.render_number(snapshot.hour as u32, DisplayCategory::Hour)?;
        nodes.push(DisplayNode::text(":"));
        nodes.extend(self.render_number(snapshot.minute as u32, DisplayCategory::Minute)?);
        nodes.push(DisplayNode::text(":"));
        nodes.extend(self.render_number(snapshot.second as u32, DisplayCategory::Second)?);
        Ok(nodes)
    }

    pub fn countdown_block(&mut self, snapshot: &ClockSnapshot) -> Result<Vec<DisplayNode>> {
        let mut nodes = vec![DisplayNode::text("距离明年还剩")];
        nodes.extend(self.render_number(snapshot.days_remaining, DisplayCategory::Countdown)?);
        nodes.push(DisplayNode::text("天"));
        Ok(nodes)
    }

    /// 重建并整块替换日期、时间和倒计时
    pub fn render_snapshot<S: DisplaySurface>(
        &mut self,
        surface: &mut S,
        snapshot: &ClockSnapshot,
    ) -> Result<()> {
        let date = self.date_block(snapshot)?;
        self.write_block(surface, DATE_ELEMENT, date)?;

        let time = self.time_block(snapshot)?;
        self.write_block(surface, TIME_ELEMENT, time)?;

        let countdown = self.countdown_block(snapshot)?;
        self.write_block(surface, COUNTDOWN_ELEMENT, countdown)
    }

    /// 重新解析并替换三个固定字面量位置
    pub fn render_fixed_literals<S: DisplaySurface>(&mut self, surface: &mut S) -> Result<()> {
        for (category, character) in FIXED_LITERALS {
            let node = self.render_literal(character, category);
            self.write_block(surface, category.as_str(), vec![node])?;
        }
        Ok(())
    }

    fn write_block<S: DisplaySurface>(
        &self,
        surface: &mut S,
        element_id: &str,
        nodes: Vec<DisplayNode>,
    ) -> Result<()> {
        surface.replace_children(element_id, nodes, self.on_failure.as_ref())
    }

    pub fn resolver(&self) -> &DigitImageResolver<R> {
        &self.resolver
    }
}
