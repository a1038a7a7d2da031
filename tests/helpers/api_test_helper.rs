// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// 说明: 每个用例既可运行在内存后端，也可运行在
//       临时文件 SQLite 后端——两种后端契约一致
// ==========================================

use std::sync::Arc;

use rusqlite::params;
use tempfile::NamedTempFile;

use workshop_mes::api::{
    DashboardApi, EventApi, MaterialApi, OrderApi, PlanningApi, ProductionApi,
};
use workshop_mes::domain::BomLine;
use workshop_mes::repository::{
    AlertRepository, DowntimeLogRepository, MaterialRepository, OrderRepository,
    PlannedProductionRepository, ProductionLogRepository,
};
use workshop_mes::services::events::EventBus;
use workshop_mes::storage::StorageBackend;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub storage: Arc<StorageBackend>,
    pub material_api: MaterialApi,
    pub order_api: OrderApi,
    pub production_api: ProductionApi,
    pub planning_api: PlanningApi,
    pub event_api: EventApi,
    pub dashboard_api: DashboardApi,
    pub events: EventBus,

    // 临时文件（确保生命周期）
    _temp_file: Option<NamedTempFile>,
}

impl ApiTestEnv {
    /// 内存后端测试环境（已写入演示种子数据）
    pub fn new_memory() -> Self {
        Self::build(Arc::new(StorageBackend::memory()), None)
    }

    /// 临时文件 SQLite 后端测试环境（已写入演示种子数据）
    pub fn new_sqlite() -> Self {
        let temp_file = NamedTempFile::new().expect("无法创建临时数据库文件");
        let db_path = temp_file.path().to_str().expect("临时路径非UTF-8").to_string();
        let storage = Arc::new(StorageBackend::open_sqlite(&db_path).expect("无法打开测试数据库"));
        Self::build(storage, Some(temp_file))
    }

    /// 两种后端各一个环境（契约一致性用例遍历使用）
    pub fn all_backends() -> Vec<Self> {
        vec![Self::new_memory(), Self::new_sqlite()]
    }

    fn build(storage: Arc<StorageBackend>, temp_file: Option<NamedTempFile>) -> Self {
        storage.seed_demo_data().expect("种子数据写入失败");

        let material_repo = Arc::new(MaterialRepository::new(Arc::clone(&storage)));
        let order_repo = Arc::new(OrderRepository::new(Arc::clone(&storage)));
        let log_repo = Arc::new(ProductionLogRepository::new(Arc::clone(&storage)));
        let planned_repo = Arc::new(PlannedProductionRepository::new(Arc::clone(&storage)));
        let alert_repo = Arc::new(AlertRepository::new(Arc::clone(&storage)));
        let downtime_repo = Arc::new(DowntimeLogRepository::new(Arc::clone(&storage)));

        let events = EventBus::new();

        Self {
            material_api: MaterialApi::new(Arc::clone(&material_repo), events.clone()),
            order_api: OrderApi::new(Arc::clone(&order_repo), events.clone()),
            production_api: ProductionApi::new(Arc::clone(&log_repo), events.clone()),
            planning_api: PlanningApi::new(planned_repo),
            event_api: EventApi::new(alert_repo, downtime_repo),
            dashboard_api: DashboardApi::new(log_repo, order_repo),
            events,
            storage,
            _temp_file: temp_file,
        }
    }

    /// 追加一条BOM行（测试数据准备，绕过API层）
    pub fn insert_bom_line(&self, bom_id: i64, material_id: i64, qty_required: i64) {
        match &*self.storage {
            StorageBackend::Sqlite(conn) => {
                conn.lock()
                    .expect("锁获取失败")
                    .execute(
                        "INSERT INTO bom (bom_id, material_id, qty_required) VALUES (?1, ?2, ?3)",
                        params![bom_id, material_id, qty_required],
                    )
                    .expect("BOM行写入失败");
            }
            StorageBackend::Memory(store) => {
                store.bom_lines.lock().expect("锁获取失败").push(BomLine {
                    bom_id,
                    material_id,
                    qty_required,
                });
            }
        }
    }

    /// 后端名称（断言消息用）
    pub fn backend_name(&self) -> &'static str {
        match &*self.storage {
            StorageBackend::Sqlite(_) => "sqlite",
            StorageBackend::Memory(_) => "memory",
        }
    }
}
