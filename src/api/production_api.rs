// ==========================================
// 车间生产计划与执行系统 - 生产日志 API
// ==========================================
// 职责: 生产日志上报与查询
// 约束: 必填字段校验在此边界完成，错误消息指明具体字段；
//       校验失败不写入任何记录
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::ProductionLog;
use crate::repository::production_log_repo::NewProductionLog;
use crate::repository::ProductionLogRepository;
use crate::services::events::{EventBus, WsEvent};

/// 日志查询默认 limit
pub const DEFAULT_LOG_LIMIT: usize = 100;
/// 日志查询 limit 上限
pub const MAX_LOG_LIMIT: usize = 500;

/// 生产日志上报请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductionLogRequest {
    pub order_id: Option<i64>,
    pub workstation_id: Option<String>,
    pub qty_good: Option<i64>,
    pub qty_reject: Option<i64>,
    pub downtime_minutes: Option<i64>,
    pub reason: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

// ==========================================
// ProductionApi - 生产日志 API
// ==========================================
pub struct ProductionApi {
    log_repo: Arc<ProductionLogRepository>,
    events: EventBus,
}

impl ProductionApi {
    pub fn new(log_repo: Arc<ProductionLogRepository>, events: EventBus) -> Self {
        Self { log_repo, events }
    }

    /// 上报生产日志
    ///
    /// # 校验
    /// - order_id / workstation_id / qty_good 必填，缺失即 400（消息指明字段）
    /// - 数量字段非负
    /// - qty_reject / downtime_minutes 缺省为 0，timestamp 缺省为当前时间
    pub fn create_log(&self, req: CreateProductionLogRequest) -> ApiResult<ProductionLog> {
        let order_id = require(req.order_id, "order_id")?;
        let workstation_id = req
            .workstation_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidInput("workstation_id 字段缺失".to_string()))?;
        let qty_good = require(req.qty_good, "qty_good")?;
        let qty_reject = req.qty_reject.unwrap_or(0);
        let downtime_minutes = req.downtime_minutes.unwrap_or(0);

        for (value, field) in [
            (qty_good, "qty_good"),
            (qty_reject, "qty_reject"),
            (downtime_minutes, "downtime_minutes"),
        ] {
            if value < 0 {
                return Err(ApiError::InvalidInput(format!("{} 必须为非负整数", field)));
            }
        }

        let log = self.log_repo.insert(NewProductionLog {
            order_id,
            workstation_id,
            qty_good,
            qty_reject,
            downtime_minutes,
            reason: req.reason,
            timestamp: req.timestamp.unwrap_or_else(Utc::now),
        })?;
        debug!("生产日志写入: id={} order_id={}", log.id, log.order_id);
        self.events.publish(&WsEvent::LogsNew { log: log.clone() });
        Ok(log)
    }

    /// 查询最近生产日志（倒序；limit 缺省 100，上限 500）
    pub fn list_logs(&self, limit: Option<usize>) -> ApiResult<Vec<ProductionLog>> {
        let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT).min(MAX_LOG_LIMIT);
        Ok(self.log_repo.list(limit)?)
    }
}

/// 必填字段取值（缺失 → InvalidInput，消息指明字段）
fn require<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::InvalidInput(format!("{} 字段缺失", field)))
}
