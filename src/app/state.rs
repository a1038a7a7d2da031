// ==========================================
// 车间生产计划与执行系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 存储后端在此处选择一次并注入所有仓储，
//       之后整个进程不再做后端判断
// ==========================================

use std::sync::Arc;

use crate::api::{
    DashboardApi, ErpApi, EventApi, MaterialApi, OrderApi, PlanningApi, ProductionApi,
};
use crate::config::AppConfig;
use crate::erp::create_adapter;
use crate::repository::{
    AlertRepository, DowntimeLogRepository, MaterialRepository, OrderRepository,
    PlannedProductionRepository, ProductionLogRepository,
};
use crate::services::events::EventBus;
use crate::storage::StorageBackend;

/// 应用状态
///
/// 包含所有API实例和共享资源，作为 HTTP 层的全局状态
pub struct AppState {
    /// 物料API
    pub material_api: MaterialApi,

    /// 订单API
    pub order_api: OrderApi,

    /// 生产日志API
    pub production_api: ProductionApi,

    /// 计划生产API
    pub planning_api: PlanningApi,

    /// 告警/停机API
    pub event_api: EventApi,

    /// 看板API（KPI 聚合，周期广播复用）
    pub dashboard_api: Arc<DashboardApi>,

    /// ERP 透传API
    pub erp_api: ErpApi,

    /// 实时事件总线
    pub events: EventBus,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 按配置选择存储后端（缺省/失败 → 内存后端）并写入种子数据
    /// 2. 初始化所有Repository
    /// 3. 解析 ERP 适配器（一次性）
    /// 4. 创建所有API实例与事件总线
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        // ==========================================
        // 存储后端（启动时选择一次）
        // ==========================================
        let storage = Arc::new(StorageBackend::from_config(config.database_path.as_deref()));
        storage.seed_demo_data()?;

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let material_repo = Arc::new(MaterialRepository::new(Arc::clone(&storage)));
        let order_repo = Arc::new(OrderRepository::new(Arc::clone(&storage)));
        let log_repo = Arc::new(ProductionLogRepository::new(Arc::clone(&storage)));
        let planned_repo = Arc::new(PlannedProductionRepository::new(Arc::clone(&storage)));
        let alert_repo = Arc::new(AlertRepository::new(Arc::clone(&storage)));
        let downtime_repo = Arc::new(DowntimeLogRepository::new(Arc::clone(&storage)));

        // ==========================================
        // 事件总线与 ERP 适配器
        // ==========================================
        let events = EventBus::new();
        let erp_adapter = create_adapter(&config.erp_adapter);

        // ==========================================
        // 初始化API层
        // ==========================================
        let dashboard_api = Arc::new(DashboardApi::new(
            Arc::clone(&log_repo),
            Arc::clone(&order_repo),
        ));

        Ok(Self {
            material_api: MaterialApi::new(material_repo, events.clone()),
            order_api: OrderApi::new(order_repo, events.clone()),
            production_api: ProductionApi::new(log_repo, events.clone()),
            planning_api: PlanningApi::new(planned_repo),
            event_api: EventApi::new(alert_repo, downtime_repo),
            dashboard_api,
            erp_api: ErpApi::new(erp_adapter),
            events,
        })
    }
}
