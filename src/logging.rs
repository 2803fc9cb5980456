// ==========================================
// 生产计划排程系统 - 日志初始化
// ==========================================
// tracing + tracing-subscriber，级别由 RUST_LOG 控制
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// RUST_LOG 未设置时的过滤规则
const DEFAULT_DIRECTIVE: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// 初始化日志系统（文本格式）
///
/// 例如 `RUST_LOG=production_scheduling::engine=debug` 可查看逐计划的落位日志
///
/// ```no_run
/// production_scheduling::logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 以 JSON 行格式初始化（批处理/日志采集）
pub fn init_json() {
    fmt().with_env_filter(env_filter()).json().with_target(true).init();
}

/// 测试用初始化，可重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
