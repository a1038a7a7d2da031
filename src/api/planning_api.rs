// ==========================================
// 车间生产计划与执行系统 - 计划生产 API
// ==========================================
// 职责: 计划生产条目的增删改查（看板落库端）
// 约束: 必填字段校验在此边界完成；部分更新为 COALESCE 语义
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::PlannedStatus;
use crate::domain::{PlannedProduction, PlannedProductionPatch};
use crate::repository::planned_repo::NewPlannedProduction;
use crate::repository::PlannedProductionRepository;

/// 计划查询默认 limit
pub const DEFAULT_PLANNED_LIMIT: usize = 200;

/// 计划生产创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlannedRequest {
    pub order_id: Option<i64>,
    pub planned_date: Option<NaiveDate>,
    pub quantity: Option<i64>,
    pub workstation_id: Option<String>,
    pub status: Option<PlannedStatus>,
}

// ==========================================
// PlanningApi - 计划生产 API
// ==========================================
pub struct PlanningApi {
    planned_repo: Arc<PlannedProductionRepository>,
}

impl PlanningApi {
    pub fn new(planned_repo: Arc<PlannedProductionRepository>) -> Self {
        Self { planned_repo }
    }

    /// 查询计划生产条目（planned_date 升序；limit 缺省 200）
    pub fn list_planned(&self, limit: Option<usize>) -> ApiResult<Vec<PlannedProduction>> {
        Ok(self
            .planned_repo
            .list(limit.unwrap_or(DEFAULT_PLANNED_LIMIT))?)
    }

    /// 创建计划生产条目
    ///
    /// # 校验
    /// - order_id / planned_date / quantity 必填（消息指明字段）
    /// - status 缺省为 planned
    pub fn create_planned(&self, req: CreatePlannedRequest) -> ApiResult<PlannedProduction> {
        let order_id = req
            .order_id
            .ok_or_else(|| ApiError::InvalidInput("order_id 字段缺失".to_string()))?;
        let planned_date = req
            .planned_date
            .ok_or_else(|| ApiError::InvalidInput("planned_date 字段缺失".to_string()))?;
        let quantity = req
            .quantity
            .ok_or_else(|| ApiError::InvalidInput("quantity 字段缺失".to_string()))?;
        if quantity < 0 {
            return Err(ApiError::InvalidInput("quantity 必须为非负整数".to_string()));
        }

        Ok(self.planned_repo.create(NewPlannedProduction {
            order_id,
            planned_date,
            quantity,
            workstation_id: req.workstation_id,
            status: req.status,
        })?)
    }

    /// 部分更新计划生产条目（未提供字段保留原值）
    pub fn update_planned(
        &self,
        id: i64,
        patch: PlannedProductionPatch,
    ) -> ApiResult<PlannedProduction> {
        Ok(self.planned_repo.update(id, patch)?)
    }

    /// 删除计划生产条目
    ///
    /// # 返回
    /// - Ok(deleted): 是否实际删除（未知 id 返回 false，与原契约一致）
    pub fn delete_planned(&self, id: i64) -> ApiResult<bool> {
        Ok(self.planned_repo.delete(id)?)
    }
}
