use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志系统
///
/// 支持通过 RUST_LOG 环境变量控制日志级别，未设置时使用 `default_level`。
///
/// 示例:
/// - RUST_LOG=debug restpad send GET https://example.com
/// - RUST_LOG=restpad::history=trace restpad history
pub fn init_logger(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试或嵌入场景下可能已经安装过 subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Logger initialized");
}
