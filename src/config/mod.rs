// ==========================================
// 车间生产计划与执行系统 - 运行配置
// ==========================================
// 职责: 进程启动时一次性读取环境变量，之后只读
// 约束: 所有配置项均可缺省——缺省时系统以
//       内存后端 + 宽松 CORS + mock ERP 运行
// ==========================================

use std::env;

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 4000;

/// KPI 广播默认间隔（秒）
pub const DEFAULT_KPI_INTERVAL_SECS: u64 = 5;

/// 应用运行配置
///
/// # 环境变量
/// - DATABASE_PATH: SQLite 数据库文件路径（缺省 = 内存后端）
/// - PORT: HTTP 监听端口（默认 4000）
/// - CORS_ORIGIN: 允许的跨域来源，逗号分隔（缺省 = 全部放行）
/// - ERP_ADAPTER: ERP 适配器选择键（默认 mock）
/// - KPI_INTERVAL_SECS: KPI 广播间隔秒数（默认 5）
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite 数据库路径（None 表示使用内存后端）
    pub database_path: Option<String>,
    /// HTTP 监听端口
    pub port: u16,
    /// 允许的跨域来源（空 = 全部放行）
    pub cors_origins: Vec<String>,
    /// ERP 适配器选择键
    pub erp_adapter: String,
    /// KPI 广播间隔（秒）
    pub kpi_interval_secs: u64,
}

impl AppConfig {
    /// 从环境变量读取配置（进程启动时调用一次）
    pub fn from_env() -> Self {
        let database_path = env::var("DATABASE_PATH").ok().filter(|s| !s.trim().is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let cors_origins = env::var("CORS_ORIGIN")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let erp_adapter = env::var("ERP_ADAPTER").unwrap_or_else(|_| "mock".to_string());

        let kpi_interval_secs = env::var("KPI_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_KPI_INTERVAL_SECS);

        Self {
            database_path,
            port,
            cors_origins,
            erp_adapter,
            kpi_interval_secs,
        }
    }
}

impl Default for AppConfig {
    /// 零依赖默认配置（内存后端，用于测试）
    fn default() -> Self {
        Self {
            database_path: None,
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
            erp_adapter: "mock".to_string(),
            kpi_interval_secs: DEFAULT_KPI_INTERVAL_SECS,
        }
    }
}
