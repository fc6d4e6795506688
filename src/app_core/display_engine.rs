// src/app_core/display_engine.rs
use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;
use log::{debug, info, warn};

use crate::common::config::ClockConfig;
use crate::common::error::Result;
use crate::driver::rng::{Lcg, RandomIndex};
use crate::driver::time_source::TimeSource;
use crate::render::{AssetCatalog, DigitImageResolver, DisplaySurface, Renderer};
use crate::service::{ClockSnapshot, RenderFingerprint, TimeService};

/// 引擎状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Stopped,
}

/// 单次tick的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 时间变化，日期、时间和倒计时已重绘
    Updated,
    /// 与上次相同，只重绘了固定字面量
    Unchanged,
}

/// 停止句柄，可在其他任务中停止时钟循环
#[derive(Clone, Default)]
pub struct StopHandle(Arc<Signal<CriticalSectionRawMutex, ()>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.signal(());
    }

    pub async fn wait(&self) {
        self.0.wait().await
    }
}

/// 数字时钟引擎：采样时间 → 解析图片 → 写入显示端
///
/// 图片缓存和上次指纹都属于引擎实例，多个实例互不影响。
pub struct DigitDisplayEngine<S: DisplaySurface, T: TimeSource, R: RandomIndex = Lcg> {
    time_service: TimeService<T>,
    renderer: Renderer<R>,
    surface: S,
    last_fingerprint: Option<RenderFingerprint>,
    last_snapshot: Option<ClockSnapshot>,
    state: EngineState,
    tick_period: Duration,
    stop: StopHandle,
}

impl<S: DisplaySurface, T: TimeSource> DigitDisplayEngine<S, T, Lcg> {
    pub fn new(config: &ClockConfig, surface: S, time_source: T) -> Result<Self> {
        let resolver = DigitImageResolver::new(AssetCatalog::from_config(config)?);
        Ok(Self::with_renderer(config, Renderer::new(resolver), surface, time_source))
    }
}

impl<S: DisplaySurface, T: TimeSource, R: RandomIndex> DigitDisplayEngine<S, T, R> {
    pub fn with_renderer(
        config: &ClockConfig,
        renderer: Renderer<R>,
        surface: S,
        time_source: T,
    ) -> Self {
        Self {
            time_service: TimeService::new(time_source),
            renderer,
            surface,
            last_fingerprint: None,
            last_snapshot: None,
            state: EngineState::Idle,
            tick_period: Duration::from_millis(config.tick_period_ms),
            stop: StopHandle::default(),
        }
    }

    /// 立即执行一次完整更新并进入运行状态
    pub fn start(&mut self) -> Result<TickOutcome> {
        if self.state == EngineState::Running {
            warn!("Clock engine already running");
        }
        self.state = EngineState::Running;
        info!(
            "Clock engine started, tick period {} ms",
            self.tick_period.as_millis()
        );
        self.tick()
    }

    /// 停止时钟循环的句柄；`run_clock` 运行期间只能通过它停止
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// 单次tick：时间变化时重绘日期、时间和倒计时，固定字面量每次都重绘
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let snapshot = self.time_service.sample()?;
        let fingerprint = snapshot.fingerprint()?;

        let outcome = if self.last_fingerprint.as_ref() == Some(&fingerprint) {
            TickOutcome::Unchanged
        } else {
            // 先记录指纹，写入失败也不会在同一秒内重试
            self.last_fingerprint = Some(fingerprint);
            debug!(
                "Rendering {}年{}月{}日 星期{} {:02}:{:02}:{:02}, {} days left",
                snapshot.year,
                snapshot.month,
                snapshot.day,
                snapshot.weekday_label(),
                snapshot.hour,
                snapshot.minute,
                snapshot.second,
                snapshot.days_remaining
            );
            self.renderer.render_snapshot(&mut self.surface, &snapshot)?;
            self.last_snapshot = Some(snapshot);
            TickOutcome::Updated
        };

        self.renderer.render_fixed_literals(&mut self.surface)?;
        self.surface.present()?;
        Ok(outcome)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.state = EngineState::Stopped;
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// 最近一次渲染的时间字段
    pub fn last_snapshot(&self) -> Option<&ClockSnapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn renderer(&self) -> &Renderer<R> {
        &self.renderer
    }
}
