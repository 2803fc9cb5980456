// ==========================================
// 生产计划排程系统 - 命令行入口
// ==========================================
// 用法:
//   production-scheduling auto [策略]      自动排程待排计划
//   production-scheduling timeline         输出甘特图数据
//   production-scheduling conflicts        输出资源冲突分析
//   production-scheduling config           输出当前配置快照
// 数据库路径: PRODUCTION_SCHEDULING_DB_PATH 或用户数据目录
// 日志格式: PRODUCTION_SCHEDULING_LOG_FORMAT=json 时输出 JSON 行
// ==========================================

use anyhow::{anyhow, bail, Context};
use production_scheduling::api::{AutoScheduleRequest, ConflictFilter};
use production_scheduling::app::{get_default_db_path, AppState};
use production_scheduling::domain::report::TimelineFilter;
use production_scheduling::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match std::env::var("PRODUCTION_SCHEDULING_LOG_FORMAT") {
        Ok(format) if format.eq_ignore_ascii_case("json") => logging::init_json(),
        _ => logging::init(),
    }

    tracing::info!("==================================================");
    tracing::info!("{}", production_scheduling::APP_NAME);
    tracing::info!("系统版本: {}", production_scheduling::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;
    let api = state.schedule_api.clone();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("auto");

    let output = match command {
        "auto" => {
            let request = AutoScheduleRequest {
                strategy: args.get(1).cloned(),
                ..Default::default()
            };
            let response = api.auto_schedule(request).await.context("自动排程失败")?;
            tracing::info!(
                "排程策略: {}，确认 {} / 冲突 {} / 失败 {}",
                response.strategy.title_cn(),
                response.confirmed,
                response.with_conflicts,
                response.failed
            );
            serde_json::to_string_pretty(&response)?
        }
        "timeline" => {
            let view = api
                .get_timeline(TimelineFilter::default())
                .context("甘特图查询失败")?;
            serde_json::to_string_pretty(&view)?
        }
        "conflicts" => {
            let report = api
                .analyze_conflicts(ConflictFilter::default())
                .context("冲突分析失败")?;
            serde_json::to_string_pretty(&report)?
        }
        "config" => state
            .config_manager
            .get_config_snapshot()
            .map_err(|e| anyhow!("配置读取失败: {}", e))?,
        other => bail!("未知命令: {} (可用: auto | timeline | conflicts | config)", other),
    };

    println!("{}", output);
    Ok(())
}
