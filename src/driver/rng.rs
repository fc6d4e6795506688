// src/driver/rng.rs
use embassy_time::Instant;

/// 随机索引源，用于在多张候选图片中选择一张
pub trait RandomIndex {
    /// 生成 0..max 的索引，max 为 0 时返回 0
    fn next_index(&mut self, max: usize) -> usize;
}

// 线性同余发生器（LCG）实现
pub struct Lcg {
    state: u32,
}

impl Lcg {
    // 初始化：使用单调时钟作为种子
    pub fn new() -> Self {
        let seed = Self::get_random_seed();
        log::debug!("LCG initialized with seed: {}", seed);
        Lcg { state: seed }
    }

    // 从外部提供种子初始化
    pub fn with_seed(seed: u32) -> Self {
        log::debug!("LCG initialized with provided seed: {}", seed);
        Lcg { state: seed }
    }

    fn get_random_seed() -> u32 {
        let micros = Instant::now().as_micros();

        // 混合低位和高位来增加随机性
        let low = (micros % 1_000_000) as u32;
        let high = (micros / 1_000) as u32;

        (high.wrapping_mul(1103515245) ^ low).wrapping_add(12345)
    }

    // 生成下一个随机数（32位）
    pub fn next(&mut self) -> u32 {
        const A: u32 = 1103515245; // LCG乘数（glibc标准）
        const C: u32 = 12345; // 增量
        self.state = A.wrapping_mul(self.state).wrapping_add(C);
        self.state
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomIndex for Lcg {
    fn next_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        // 低位周期太短，取高16位
        ((self.next() >> 16) as usize) % max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::with_seed(42);
        let mut b = Lcg::with_seed(42);
        for _ in 0..16 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn index_stays_in_range() {
        let mut lcg = Lcg::with_seed(7);
        assert_eq!(lcg.next_index(0), 0);
        for _ in 0..200 {
            assert!(lcg.next_index(3) < 3);
        }
    }

    #[test]
    fn every_index_is_reachable() {
        let mut lcg = Lcg::with_seed(2024);
        let mut seen = [false; 4];
        for _ in 0..400 {
            seen[lcg.next_index(4)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
