//! HTML显示端 - 将元素内容渲染为标记，并写出完整的宿主页面
//!
//! 图片加载失败由浏览器处理：`onerror` 隐藏图片并在原位置显示字符。

use std::path::PathBuf;

use crate::common::config::ClockConfig;
use crate::common::error::{AppError, Result};
use crate::render::{
    COUNTDOWN_ELEMENT, DATE_ELEMENT, DigitNode, DisplayCategory, DisplayNode, DisplaySurface,
    ELEMENT_IDS, LoadFailureHandler, TIME_ELEMENT,
};

const IMAGE_FALLBACK_SCRIPT: &str =
    "this.style.display='none';this.parentNode.appendChild(document.createTextNode(this.alt))";

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn digit_markup(node: &DigitNode) -> String {
    let inner = match &node.image {
        Some(image) if !node.image_hidden() => format!(
            r#"<img src="{}" alt="{}" class="digit-img" onerror="{}">"#,
            escape(image.location()),
            node.fallback,
            IMAGE_FALLBACK_SCRIPT
        ),
        _ => node.fallback.to_string(),
    };
    if node.wrapped {
        format!(r#"<span class="digit">{}</span>"#, inner)
    } else {
        inner
    }
}

/// 节点列表的标记
pub fn nodes_markup(nodes: &[DisplayNode]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            DisplayNode::Text(text) => escape(text),
            DisplayNode::Digit(digit) => digit_markup(digit),
        })
        .collect()
}

pub struct HtmlSurface {
    /// 元素ID与当前标记，按页面顺序
    elements: Vec<(String, String)>,
    title: String,
    /// 页面自动刷新间隔（秒）
    refresh_secs: u64,
    output_path: Option<PathBuf>,
    dirty: bool,
}

impl HtmlSurface {
    /// 只在内存中保存标记
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            elements: ELEMENT_IDS
                .iter()
                .map(|id| (id.to_string(), String::new()))
                .collect(),
            title: title.into(),
            refresh_secs: 1,
            output_path: None,
            dirty: true,
        }
    }

    /// 每次内容变化后写出页面文件
    pub fn from_config(config: &ClockConfig) -> Self {
        let mut surface = Self::new(config.page_title.clone());
        surface.refresh_secs = config.tick_period_ms.div_ceil(1000).max(1);
        surface.output_path = Some(config.output_path.clone());
        surface
    }

    pub fn markup(&self, id: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|(element_id, _)| element_id == id)
            .map(|(_, markup)| markup.as_str())
    }

    fn element_markup(&self, id: &str) -> &str {
        self.markup(id).unwrap_or_default()
    }

    /// 完整的宿主页面
    pub fn page(&self) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n",
                "<meta charset=\"utf-8\">\n",
                "<meta http-equiv=\"refresh\" content=\"{refresh}\">\n",
                "<title>{title}</title>\n",
                "<style>.digit-img{{height:1em;vertical-align:middle}}</style>\n",
                "</head>\n<body>\n",
                "<div id=\"{date_id}\">{date}</div>\n",
                "<div id=\"{time_id}\">{time}</div>\n",
                "<div id=\"{countdown_id}\">{countdown}</div>\n",
                "<div class=\"units\">",
                "<span id=\"{ten1_id}\">{ten1}</span>",
                "<span id=\"{ten2_id}\">{ten2}</span>",
                "<span id=\"{wan_id}\">{wan}</span>",
                "</div>\n</body>\n</html>\n"
            ),
            refresh = self.refresh_secs,
            title = escape(&self.title),
            date_id = DATE_ELEMENT,
            date = self.element_markup(DATE_ELEMENT),
            time_id = TIME_ELEMENT,
            time = self.element_markup(TIME_ELEMENT),
            countdown_id = COUNTDOWN_ELEMENT,
            countdown = self.element_markup(COUNTDOWN_ELEMENT),
            ten1_id = DisplayCategory::Ten1.as_str(),
            ten1 = self.element_markup(DisplayCategory::Ten1.as_str()),
            ten2_id = DisplayCategory::Ten2.as_str(),
            ten2 = self.element_markup(DisplayCategory::Ten2.as_str()),
            wan_id = DisplayCategory::Wan.as_str(),
            wan = self.element_markup(DisplayCategory::Wan.as_str()),
        )
    }
}

impl DisplaySurface for HtmlSurface {
    fn replace_children(
        &mut self,
        element_id: &str,
        nodes: Vec<DisplayNode>,
        _on_failure: &dyn LoadFailureHandler,
    ) -> Result<()> {
        let (_, markup) = self
            .elements
            .iter_mut()
            .find(|(id, _)| id == element_id)
            .ok_or_else(|| AppError::ElementNotFound(element_id.to_string()))?;

        let next = nodes_markup(&nodes);
        if *markup != next {
            *markup = next;
            self.dirty = true;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.output_path {
            std::fs::write(path, self.page())?;
            log::debug!("Wrote clock page to {}", path.display());
        }
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayCharacter, ImageReference, LogLoadFailure};

    fn digit(location: Option<&str>, c: char, wrapped: bool) -> DisplayNode {
        let character = DisplayCharacter::from_char(c).unwrap();
        DisplayNode::Digit(DigitNode::new(
            location.map(|l| ImageReference::new(l, character)),
            character,
            wrapped,
        ))
    }

    #[test]
    fn wrapped_digit_markup() {
        let markup = nodes_markup(&[digit(Some("resources/3/3-1.png"), '3', true), DisplayNode::text("月")]);
        assert!(markup.starts_with(r#"<span class="digit"><img src="resources/3/3-1.png" alt="3" class="digit-img""#));
        assert!(markup.ends_with("</span>月"));
    }

    #[test]
    fn absent_image_renders_character() {
        assert_eq!(nodes_markup(&[digit(None, '5', true)]), r#"<span class="digit">5</span>"#);
        assert_eq!(nodes_markup(&[digit(None, '万', false)]), "万");
    }

    #[test]
    fn unknown_element_is_an_error() {
        let mut surface = HtmlSurface::new("clock");
        let err = surface
            .replace_children("clock", vec![], &LogLoadFailure)
            .unwrap_err();
        assert_eq!(err, AppError::ElementNotFound("clock".into()));
    }

    #[test]
    fn present_writes_page_only_when_changed() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClockConfig {
            output_path: dir.path().join("clock.html"),
            ..ClockConfig::default()
        };
        let mut surface = HtmlSurface::from_config(&config);
        surface
            .replace_children("wan", vec![digit(Some("resources/万/万-1.png"), '万', false)], &LogLoadFailure)
            .unwrap();
        surface.present().unwrap();

        let page = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(page.contains(r#"<span id="wan"><img src="resources/万/万-1.png""#));
        for id in ELEMENT_IDS {
            assert!(page.contains(&format!("id=\"{}\"", id)));
        }

        assert!(page.contains(r#"<meta http-equiv="refresh" content="1">"#));

        std::fs::remove_file(&config.output_path).unwrap();
        surface
            .replace_children("wan", vec![digit(Some("resources/万/万-1.png"), '万', false)], &LogLoadFailure)
            .unwrap();
        surface.present().unwrap();
        assert!(!config.output_path.exists());
    }

    #[test]
    fn page_refreshes_at_tick_period() {
        let config = ClockConfig {
            tick_period_ms: 2500,
            ..ClockConfig::default()
        };
        let page = HtmlSurface::from_config(&config).page();
        assert!(page.contains(r#"<meta http-equiv="refresh" content="3">"#));

        let page = HtmlSurface::new("clock").page();
        assert!(page.contains(r#"<meta http-equiv="refresh" content="1">"#));
    }
}
