//! 数字图片解析器
//!
//! 按显示位置缓存每个字符对应的图片路径。同一位置字符不变时直接复用上次的结果，
//! 字符变化时只替换该位置的缓存项。

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::config::ClockConfig;
use crate::common::error::Result;
use crate::driver::rng::{Lcg, RandomIndex};
use crate::render::{DisplayCharacter, DisplaySlot};

/// 图片资源定位符（路径或URL）及其对应字符
///
/// 解析时不检查资源是否存在，由显示端在加载时发现错误。
#[derive(Debug, Clone)]
pub struct ImageReference {
    location: Arc<str>,
    character: DisplayCharacter,
}

impl ImageReference {
    pub fn new(location: impl Into<Arc<str>>, character: DisplayCharacter) -> Self {
        Self {
            location: location.into(),
            character,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn character(&self) -> DisplayCharacter {
        self.character
    }

    /// 是否与另一个引用共享同一份路径（缓存命中时为真）
    pub fn same_allocation(&self, other: &ImageReference) -> bool {
        Arc::ptr_eq(&self.location, &other.location)
    }
}

impl PartialEq for ImageReference {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.character == other.character
    }
}

impl Eq for ImageReference {}

/// 图片资源目录：根路径、扩展名和每个字符的候选文件
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    base_path: String,
    extension: String,
    overrides: HashMap<DisplayCharacter, Vec<String>>,
}

impl AssetCatalog {
    pub fn new(base_path: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            extension: extension.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn from_config(config: &ClockConfig) -> Result<Self> {
        let mut catalog = Self::new(config.base_path.clone(), config.image_extension.clone());
        for (character, files) in config.candidate_overrides()? {
            catalog = catalog.with_candidates(character, files);
        }
        Ok(catalog)
    }

    /// 为字符指定候选文件列表，空列表表示该字符没有图片
    pub fn with_candidates(mut self, character: DisplayCharacter, files: Vec<String>) -> Self {
        self.overrides.insert(character, files);
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// 字符的候选文件名，默认只有一个 `<字符>-1.<扩展名>`
    pub fn candidates_for(&self, character: DisplayCharacter) -> Vec<String> {
        match self.overrides.get(&character) {
            Some(files) => files.clone(),
            None => vec![format!("{}-1.{}", character, self.extension)],
        }
    }

    /// `<根路径><字符>/<文件名>`，字符原样插入，不做URL转义
    pub fn location_of(&self, character: DisplayCharacter, file: &str) -> String {
        format!("{}{}/{}", self.base_path, character, file)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    character: DisplayCharacter,
    reference: Option<ImageReference>,
}

/// 数字图片解析器
pub struct DigitImageResolver<R: RandomIndex = Lcg> {
    catalog: AssetCatalog,
    /// 每个字符的候选文件列表（跨位置共享）
    image_files: HashMap<DisplayCharacter, Arc<[String]>>,
    /// 每个显示位置当前的字符和图片
    digit_cache: HashMap<DisplaySlot, CacheEntry>,
    rng: R,
}

impl DigitImageResolver<Lcg> {
    pub fn new(catalog: AssetCatalog) -> Self {
        Self::with_rng(catalog, Lcg::new())
    }
}

impl<R: RandomIndex> DigitImageResolver<R> {
    pub fn with_rng(catalog: AssetCatalog, rng: R) -> Self {
        Self {
            catalog,
            image_files: HashMap::new(),
            digit_cache: HashMap::new(),
            rng,
        }
    }

    /// 为指定位置解析字符图片
    pub fn resolve(
        &mut self,
        character: DisplayCharacter,
        slot: DisplaySlot,
    ) -> Option<ImageReference> {
        if let Some(entry) = self.digit_cache.get(&slot) {
            if entry.character == character {
                return entry.reference.clone();
            }
        }

        let files = self.image_files_for(character);
        let chosen = match files.len() {
            0 => None,
            1 => Some(&files[0]),
            n => Some(&files[self.rng.next_index(n)]),
        };
        let reference = chosen
            .map(|file| ImageReference::new(self.catalog.location_of(character, file), character));

        if reference.is_none() {
            log::debug!("No sprite for {} at {:?}", character, slot);
        }

        self.digit_cache.insert(
            slot,
            CacheEntry {
                character,
                reference: reference.clone(),
            },
        );
        reference
    }

    fn image_files_for(&mut self, character: DisplayCharacter) -> Arc<[String]> {
        if let Some(files) = self.image_files.get(&character) {
            return files.clone();
        }
        let files: Arc<[String]> = self.catalog.candidates_for(character).into();
        self.image_files.insert(character, files.clone());
        files
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn cached_slots(&self) -> usize {
        self.digit_cache.len()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}
