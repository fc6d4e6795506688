// src/tasks/clock_task.rs
use embassy_futures::select::{Either, select};
use embassy_time::Ticker;

use crate::app_core::DigitDisplayEngine;
use crate::common::error::Result;
use crate::driver::rng::RandomIndex;
use crate::driver::time_source::TimeSource;
use crate::render::DisplaySurface;

/// 时钟循环：立即更新一次，之后按固定周期tick，直到停止句柄被触发
///
/// 单次tick失败只记录日志，下一次tick照常进行。
pub async fn run_clock<S, T, R>(engine: &mut DigitDisplayEngine<S, T, R>) -> Result<()>
where
    S: DisplaySurface,
    T: TimeSource,
    R: RandomIndex,
{
    let stop = engine.stop_handle();
    if let Err(e) = engine.start() {
        log::error!("Initial clock update failed: {}", e);
    }

    let mut ticker = Ticker::every(engine.tick_period());
    log::debug!("Clock task entering main loop");

    loop {
        // 停止信号优先，已停止时不再等待下一次tick
        match select(stop.wait(), ticker.next()).await {
            Either::First(()) => break,
            Either::Second(()) => {
                if let Err(e) = engine.tick() {
                    log::error!("Clock tick failed: {}", e);
                }
            }
        }
    }

    engine.mark_stopped();
    log::info!("Clock task exited");
    Ok(())
}
