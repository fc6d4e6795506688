//! 图片数字时钟主入口
//!
//! 用法：`sprite_clock [配置文件.json]`，页面写到配置中的 `output_path`。

use embassy_executor::Spawner;
use log::{error, info};

use sprite_clock::driver::SystemTimeSource;
use sprite_clock::render::HtmlSurface;
use sprite_clock::tasks::run_clock;
use sprite_clock::{ClockConfig, DigitDisplayEngine};

fn load_config() -> Result<ClockConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ClockConfig::load(path)?),
        None => Ok(ClockConfig::default()),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    // 初始化日志，RUST_LOG优先于配置
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    info!("Sprite clock starting");
    info!(
        "Images from {}, page at {}",
        config.base_path,
        config.output_path.display()
    );

    let surface = HtmlSurface::from_config(&config);
    let mut engine = DigitDisplayEngine::new(&config, surface, SystemTimeSource)?;
    run_clock(&mut engine).await?;

    info!("Sprite clock exited");
    Ok(())
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    if let Err(e) = run().await {
        error!("Sprite clock failed: {}", e);
        eprintln!("sprite_clock: {}", e);
        std::process::exit(1);
    }
}
