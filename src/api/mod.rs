// ==========================================
// 车间生产计划与执行系统 - API 层
// ==========================================
// 职责: 边界校验 + 仓储调用 + 变更事件发布
// 红线: 请求校验只发生在这一层；仓储层只抛 NotFound
// ==========================================

pub mod dashboard_api;
pub mod erp_api;
pub mod error;
pub mod event_api;
pub mod material_api;
pub mod order_api;
pub mod planning_api;
pub mod production_api;

// 重导出核心 API
pub use dashboard_api::DashboardApi;
pub use erp_api::ErpApi;
pub use error::{ApiError, ApiResult};
pub use event_api::{CreateAlertRequest, CreateDowntimeRequest, EventApi};
pub use material_api::{MaterialApi, UpdateStockRequest};
pub use order_api::{OrderApi, UpdateOrderRequest};
pub use planning_api::{CreatePlannedRequest, PlanningApi};
pub use production_api::{CreateProductionLogRequest, ProductionApi};
