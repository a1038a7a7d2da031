// ==========================================
// 车间生产计划与执行系统 - ERP 透传 API
// ==========================================
// 职责: 将 HTTP 层的 ERP 查询透传给启动时解析好的适配器
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::erp::{ErpAdapter, ErpBomLine, ErpMaterialAvailability, ErpOrderDetails};

// ==========================================
// ErpApi - ERP 透传 API
// ==========================================
pub struct ErpApi {
    adapter: Arc<dyn ErpAdapter>,
}

impl ErpApi {
    pub fn new(adapter: Arc<dyn ErpAdapter>) -> Self {
        Self { adapter }
    }

    /// 订单详情透传
    pub async fn order_details(&self, order_id: &str) -> ApiResult<ErpOrderDetails> {
        self.adapter
            .get_order_details(order_id)
            .await
            .map_err(ApiError::Other)
    }

    /// 订单 BOM 透传
    pub async fn bom(&self, order_id: &str) -> ApiResult<Vec<ErpBomLine>> {
        self.adapter.get_bom(order_id).await.map_err(ApiError::Other)
    }

    /// 物料可用性透传
    pub async fn material_availability(&self, order_id: &str) -> ApiResult<ErpMaterialAvailability> {
        self.adapter
            .get_material_availability(order_id)
            .await
            .map_err(ApiError::Other)
    }

    /// 工序标准工时透传
    pub async fn operation_smv(&self, order_id: &str, operation_id: i64) -> ApiResult<f64> {
        self.adapter
            .get_operation_smv(order_id, operation_id)
            .await
            .map_err(ApiError::Other)
    }
}
