// ==========================================
// 车间生产计划与执行系统 - 告警/停机 API
// ==========================================
// 职责: 追加式事件记录（告警、停机）的上报与查询
// 约束: 必填字段校验在此边界完成
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::AlertLevel;
use crate::domain::{Alert, DowntimeLog};
use crate::repository::downtime_repo::NewDowntimeLog;
use crate::repository::{AlertRepository, DowntimeLogRepository};

/// 事件查询默认 limit
pub const DEFAULT_EVENT_LIMIT: usize = 200;

/// 告警上报请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlertRequest {
    pub level: Option<String>, // 缺省 info
    pub message: Option<String>,
}

/// 停机上报请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDowntimeRequest {
    pub workstation_id: Option<String>,
    pub reason: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

// ==========================================
// EventApi - 告警/停机 API
// ==========================================
pub struct EventApi {
    alert_repo: Arc<AlertRepository>,
    downtime_repo: Arc<DowntimeLogRepository>,
}

impl EventApi {
    pub fn new(alert_repo: Arc<AlertRepository>, downtime_repo: Arc<DowntimeLogRepository>) -> Self {
        Self {
            alert_repo,
            downtime_repo,
        }
    }

    /// 上报告警（message 必填，level 缺省 info）
    pub fn create_alert(&self, req: CreateAlertRequest) -> ApiResult<Alert> {
        let message = req
            .message
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::InvalidInput("message 字段缺失".to_string()))?;
        let level = AlertLevel::from_str(req.level.as_deref().unwrap_or("info"));
        Ok(self.alert_repo.insert(level, message)?)
    }

    /// 查询最近告警（倒序；limit 缺省 200）
    pub fn list_alerts(&self, limit: Option<usize>) -> ApiResult<Vec<Alert>> {
        Ok(self.alert_repo.list(limit.unwrap_or(DEFAULT_EVENT_LIMIT))?)
    }

    /// 上报停机记录（workstation_id / reason / start_time 必填）
    pub fn create_downtime(&self, req: CreateDowntimeRequest) -> ApiResult<DowntimeLog> {
        let workstation_id = req
            .workstation_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidInput("workstation_id 字段缺失".to_string()))?;
        let reason = req
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidInput("reason 字段缺失".to_string()))?;
        let start_time = req
            .start_time
            .ok_or_else(|| ApiError::InvalidInput("start_time 字段缺失".to_string()))?;

        Ok(self.downtime_repo.insert(NewDowntimeLog {
            workstation_id,
            reason,
            start_time,
            end_time: req.end_time,
        })?)
    }

    /// 查询最近停机记录（倒序；limit 缺省 200）
    pub fn list_downtime(&self, limit: Option<usize>) -> ApiResult<Vec<DowntimeLog>> {
        Ok(self
            .downtime_repo
            .list(limit.unwrap_or(DEFAULT_EVENT_LIMIT))?)
    }
}
