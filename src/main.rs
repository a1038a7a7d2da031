// ==========================================
// 车间生产计划与执行系统 - 服务主入口
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 排产看板后端服务
// ==========================================

use std::sync::Arc;

use workshop_mes::app::AppState;
use workshop_mes::config::AppConfig;
use workshop_mes::services::kpi_broadcast::spawn_kpi_broadcast;
use workshop_mes::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 排产看板后端服务", workshop_mes::APP_NAME);
    tracing::info!("系统版本: {}", workshop_mes::VERSION);
    tracing::info!("==================================================");

    // 读取运行配置
    let config = AppConfig::from_env();
    match &config.database_path {
        Some(path) => tracing::info!("使用数据库: {}", path),
        None => tracing::info!("未配置 DATABASE_PATH，使用内存后端"),
    }

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let state = Arc::new(AppState::new(&config)?);
    tracing::info!("AppState初始化成功");

    // 周期 KPI 广播
    let _kpi_task = spawn_kpi_broadcast(
        Arc::clone(&state.dashboard_api),
        state.events.clone(),
        config.kpi_interval_secs,
    );

    // 启动 HTTP/WebSocket 服务
    server::serve(state, &config).await
}
