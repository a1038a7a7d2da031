// ==========================================
// 车间生产计划与执行系统 - 应用层
// ==========================================
// 职责: 应用级共享状态装配
// ==========================================

pub mod state;

pub use state::AppState;
