// ==========================================
// 车间生产计划与执行系统 - 生产记录领域模型
// ==========================================
// 红线: 生产日志 / 告警 / 停机记录均为追加式，创建后不可变更
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AlertLevel, PlannedStatus};

// ==========================================
// ProductionLog - 生产日志（追加式）
// ==========================================
// 对齐: production_logs 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionLog {
    // ===== 主键 =====
    pub id: i64,

    // ===== 业务字段（透传，不在仓储层校验）=====
    pub order_id: i64,              // 关联订单
    pub workstation_id: String,     // 工位标识
    pub qty_good: i64,              // 良品数量
    pub qty_reject: i64,            // 不良品数量
    pub downtime_minutes: i64,      // 停机分钟数
    pub reason: Option<String>,     // 备注/原因
    pub timestamp: DateTime<Utc>,   // 业务发生时间（上报方提供）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,  // 记录写入时间
}

// ==========================================
// PlannedProduction - 计划生产条目
// ==========================================
// 对齐: planned_production 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedProduction {
    pub id: i64,
    pub order_id: i64,                  // 关联订单
    pub planned_date: NaiveDate,        // 计划日期
    pub quantity: i64,                  // 计划数量
    pub workstation_id: Option<String>, // 工位（可选）
    pub status: PlannedStatus,          // 状态（默认 planned）
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 计划生产条目的部分更新（None = 保留原值，COALESCE 语义）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannedProductionPatch {
    pub order_id: Option<i64>,
    pub planned_date: Option<NaiveDate>,
    pub quantity: Option<i64>,
    pub workstation_id: Option<String>,
    pub status: Option<PlannedStatus>,
}

// ==========================================
// Alert - 告警事件（追加式）
// ==========================================
// 对齐: alerts 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub level: AlertLevel,
    pub message: String,
    pub acknowledged: bool, // 创建时恒为 false
    pub created_at: DateTime<Utc>,
}

// ==========================================
// DowntimeLog - 停机记录（追加式）
// ==========================================
// 对齐: downtime_logs 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DowntimeLog {
    pub id: i64,
    pub workstation_id: String,
    pub reason: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>, // 停机未结束时为 None
    pub created_at: DateTime<Utc>,
}
