//! 内存显示端 - 模拟宿主页面，记录每个元素的内容和写入次数

use std::collections::{HashMap, HashSet};

use crate::common::error::{AppError, Result};
use crate::render::{DisplayNode, DisplaySurface, ELEMENT_IDS, LoadFailureHandler};

#[derive(Debug, Default)]
struct Element {
    nodes: Vec<DisplayNode>,
    writes: u32,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: HashMap<String, Element>,
    /// 加载会失败的图片路径
    broken: HashSet<String>,
}

impl MemorySurface {
    /// 创建包含全部时钟元素的显示端
    pub fn new() -> Self {
        let mut surface = Self::default();
        for id in ELEMENT_IDS {
            surface.add_element(id);
        }
        surface
    }

    pub fn add_element(&mut self, id: &str) {
        self.elements.entry(id.to_string()).or_default();
    }

    /// 移除元素，模拟页面缺少该元素
    pub fn remove_element(&mut self, id: &str) {
        self.elements.remove(id);
    }

    /// 让指定路径的图片加载失败
    pub fn break_image(&mut self, location: &str) {
        self.broken.insert(location.to_string());
    }

    pub fn nodes(&self, id: &str) -> Option<&[DisplayNode]> {
        self.elements.get(id).map(|e| e.nodes.as_slice())
    }

    /// 元素被整块替换的次数
    pub fn writes(&self, id: &str) -> u32 {
        self.elements.get(id).map(|e| e.writes).unwrap_or(0)
    }

    /// 元素的文字形式（无障碍回退视图）
    pub fn text(&self, id: &str) -> Option<String> {
        self.nodes(id)
            .map(|nodes| nodes.iter().map(DisplayNode::plain_text).collect())
    }
}

impl DisplaySurface for MemorySurface {
    fn replace_children(
        &mut self,
        element_id: &str,
        mut nodes: Vec<DisplayNode>,
        on_failure: &dyn LoadFailureHandler,
    ) -> Result<()> {
        let element = self
            .elements
            .get_mut(element_id)
            .ok_or_else(|| AppError::ElementNotFound(element_id.to_string()))?;

        for node in nodes.iter_mut() {
            if let DisplayNode::Digit(digit) = node {
                let failed = digit
                    .image
                    .as_ref()
                    .filter(|image| self.broken.contains(image.location()));
                if let Some(image) = failed {
                    on_failure.on_load_failure(element_id, image);
                    digit.mark_load_failed();
                }
            }
        }

        element.nodes = nodes;
        element.writes += 1;
        Ok(())
    }
}
