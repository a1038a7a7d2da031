// ==========================================
// 车间生产计划与执行系统 - 引擎层
// ==========================================
// 职责: 业务规则计算（齐套判定、KPI 聚合）
// 红线: 引擎层为纯计算，不直接访问存储
// ==========================================

pub mod kpi;
pub mod shortage;

pub use kpi::{build_overview, KpiOverview, ProductionTotals};
pub use shortage::{build_bom_items, has_shortage, BomJoinRow};
