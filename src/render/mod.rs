// src/render/mod.rs
mod character;
pub use character::{DisplayCategory, DisplayCharacter, DisplaySlot};

mod digit_resolver;
pub use digit_resolver::{AssetCatalog, DigitImageResolver, ImageReference};

mod surface;
pub use surface::{DigitNode, DisplayNode, DisplaySurface, LoadFailureHandler, LogLoadFailure};

mod renderer;
pub use renderer::{Renderer, format_value};

mod memory_surface;
pub use memory_surface::MemorySurface;

mod html_surface;
pub use html_surface::HtmlSurface;

/// 日期块元素ID
pub const DATE_ELEMENT: &str = "date";
/// 时间块元素ID
pub const TIME_ELEMENT: &str = "time";
/// 倒计时块元素ID
pub const COUNTDOWN_ELEMENT: &str = "countdown";

/// 宿主页面必须提供的全部元素ID
pub const ELEMENT_IDS: [&str; 6] = [
    DATE_ELEMENT,
    TIME_ELEMENT,
    COUNTDOWN_ELEMENT,
    DisplayCategory::Ten1.as_str(),
    DisplayCategory::Ten2.as_str(),
    DisplayCategory::Wan.as_str(),
];
