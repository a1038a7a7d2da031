// ==========================================
// 车间生产计划与执行系统 - 物料 API
// ==========================================
// 职责: 物料查询、库存更新
// 约束: stock_qty 非负校验在此边界完成（仓储层不重复校验）
// ==========================================

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::Material;
use crate::repository::MaterialRepository;
use crate::services::events::{EventBus, WsEvent};

/// 库存更新请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStockRequest {
    pub stock_qty: Option<i64>,
}

// ==========================================
// MaterialApi - 物料 API
// ==========================================
pub struct MaterialApi {
    material_repo: Arc<MaterialRepository>,
    events: EventBus,
}

impl MaterialApi {
    pub fn new(material_repo: Arc<MaterialRepository>, events: EventBus) -> Self {
        Self {
            material_repo,
            events,
        }
    }

    /// 查询全部物料（按名称升序）
    pub fn list_materials(&self) -> ApiResult<Vec<Material>> {
        Ok(self.material_repo.list()?)
    }

    /// 更新物料库存
    ///
    /// # 校验
    /// - stock_qty 必填且为非负整数，否则 InvalidInput（400）
    /// - 未知 material_id → NotFound（404），不产生任何变更
    pub fn update_stock(&self, material_id: i64, req: UpdateStockRequest) -> ApiResult<Material> {
        let stock_qty = req
            .stock_qty
            .ok_or_else(|| ApiError::InvalidInput("stock_qty 字段缺失".to_string()))?;
        if stock_qty < 0 {
            return Err(ApiError::InvalidInput(
                "stock_qty 必须为非负整数".to_string(),
            ));
        }

        let material = self.material_repo.update_stock(material_id, stock_qty)?;
        debug!(
            "库存更新: material_id={} stock_qty={}",
            material_id, stock_qty
        );
        self.events.publish(&WsEvent::MaterialsUpdate {
            material: material.clone(),
        });
        Ok(material)
    }
}
