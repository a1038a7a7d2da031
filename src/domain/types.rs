// ==========================================
// 车间生产计划与执行系统 - 领域枚举类型
// ==========================================
// 约束: 所有枚举与数据库 TEXT 列一一对应，
//       转换统一走 as_str / from_str，避免散落的字符串字面量
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// OrderStatus - 生产订单状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// 已计划
    Planned,
    /// 进行中
    InProgress,
    /// 已完成
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Planned => "planned",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
        }
    }

    /// 未知值归入 Planned（历史数据宽容处理）
    pub fn from_str(s: &str) -> Self {
        match s {
            "in_progress" => OrderStatus::InProgress,
            "completed" => OrderStatus::Completed,
            _ => OrderStatus::Planned,
        }
    }
}

// ==========================================
// PlannedStatus - 计划生产条目状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedStatus {
    /// 已计划（默认）
    Planned,
    /// 已下发
    Released,
    /// 已完成
    Done,
}

impl PlannedStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PlannedStatus::Planned => "planned",
            PlannedStatus::Released => "released",
            PlannedStatus::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "released" => PlannedStatus::Released,
            "done" => PlannedStatus::Done,
            _ => PlannedStatus::Planned,
        }
    }
}

impl Default for PlannedStatus {
    fn default() -> Self {
        PlannedStatus::Planned
    }
}

// ==========================================
// AlertLevel - 告警级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "warning" => AlertLevel::Warning,
            "critical" => AlertLevel::Critical,
            _ => AlertLevel::Info,
        }
    }
}
