//! 显示端抽象
//!
//! 渲染器只依赖这里定义的能力：按ID整块替换元素内容，以及图片加载失败的回调。

use crate::common::error::Result;
use crate::render::{DisplayCharacter, ImageReference};

/// 图片加载失败回调，显示端发现失败时调用，不阻塞渲染
pub trait LoadFailureHandler {
    fn on_load_failure(&self, element_id: &str, image: &ImageReference);
}

/// 默认回调：只输出一条诊断日志
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLoadFailure;

impl LoadFailureHandler for LogLoadFailure {
    fn on_load_failure(&self, element_id: &str, image: &ImageReference) {
        log::warn!(
            "Image failed to load in #{}: {} (showing '{}' as text)",
            element_id,
            image.location(),
            image.character()
        );
    }
}

/// 单个字符的图片节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitNode {
    pub image: Option<ImageReference>,
    /// 图片不可用时显示的原字符
    pub fallback: DisplayCharacter,
    /// 是否包在 `span.digit` 里；固定字面量直接放图片
    pub wrapped: bool,
    image_hidden: bool,
}

impl DigitNode {
    pub fn new(image: Option<ImageReference>, fallback: DisplayCharacter, wrapped: bool) -> Self {
        Self {
            image,
            fallback,
            wrapped,
            image_hidden: false,
        }
    }

    /// 加载失败：隐藏图片，改为显示字符。不影响解析缓存
    pub fn mark_load_failed(&mut self) {
        self.image_hidden = true;
    }

    pub fn image_hidden(&self) -> bool {
        self.image_hidden
    }

    /// 当前是否以文字形式显示
    pub fn shows_text(&self) -> bool {
        self.image_hidden || self.image.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    /// 普通文字，如“年”“月”“:”
    Text(String),
    Digit(DigitNode),
}

impl DisplayNode {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    /// 节点的文字形式，图片节点取其原字符
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Digit(node) => node.fallback.to_string(),
        }
    }
}

/// 显示端
pub trait DisplaySurface {
    /// 用 `nodes` 整块替换元素内容；元素不存在时返回错误
    fn replace_children(
        &mut self,
        element_id: &str,
        nodes: Vec<DisplayNode>,
        on_failure: &dyn LoadFailureHandler,
    ) -> Result<()>;

    /// 一次tick的所有写入完成后调用
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}
