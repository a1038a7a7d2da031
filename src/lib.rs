// ==========================================
// 车间生产计划与执行系统 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 排产看板后端服务 (REST + WebSocket)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则（缺料计算 / KPI 聚合）
pub mod engine;

// 存储层 - 后端选择与种子数据
pub mod storage;

// ERP 适配层 - 外部系统
pub mod erp;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 服务层 - 事件总线与周期任务
pub mod services;

// HTTP/WebSocket 服务层
pub mod server;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertLevel, OrderStatus, PlannedStatus};

// 领域实体
pub use domain::{
    Alert, BomItemView, BomLine, DowntimeLog, Material, OrderRecord, OrderView,
    PlannedProduction, PlannedProductionPatch, ProductionLog,
};

// 引擎
pub use engine::{build_bom_items, build_overview, has_shortage, KpiOverview, ProductionTotals};

// 存储
pub use storage::StorageBackend;

// API
pub use api::{
    ApiError, ApiResult, DashboardApi, ErpApi, EventApi, MaterialApi, OrderApi, PlanningApi,
    ProductionApi,
};

// 服务
pub use services::events::{EventBus, WsEvent};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车间生产计划与执行系统";

// ==========================================
// 预编译检查
// ==========================================
