// ==========================================
// 车间生产计划与执行系统 - 领域层
// ==========================================
// 职责: 定义领域实体与枚举类型
// 红线: 领域层不依赖仓储/存储细节
// ==========================================

pub mod material;
pub mod order;
pub mod production;
pub mod types;

// 重导出核心实体
pub use material::Material;
pub use order::{BomItemView, BomLine, OrderRecord, OrderView};
pub use production::{
    Alert, DowntimeLog, PlannedProduction, PlannedProductionPatch, ProductionLog,
};
pub use types::{AlertLevel, OrderStatus, PlannedStatus};
