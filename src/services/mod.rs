// ==========================================
// 车间生产计划与执行系统 - 服务层
// ==========================================
// 职责: 请求处理之外的后台能力（事件广播、周期任务）
// ==========================================

pub mod events;
pub mod kpi_broadcast;

pub use events::{EventBus, WsEvent};
pub use kpi_broadcast::spawn_kpi_broadcast;
