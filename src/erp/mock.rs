// ==========================================
// 车间生产计划与执行系统 - Mock ERP 适配器
// ==========================================
// 职责: 返回固定演示数据，供无 ERP 环境下联调使用
// ==========================================

use async_trait::async_trait;

use super::{
    ErpAdapter, ErpAvailabilityItem, ErpBomLine, ErpMaterialAvailability, ErpOperation,
    ErpOrderDetails, ErpResult,
};

/// 未知工序的兜底 SMV（分钟）
const DEFAULT_SMV: f64 = 4.0;

// ==========================================
// MockErpAdapter
// ==========================================
#[derive(Debug, Default)]
pub struct MockErpAdapter;

impl MockErpAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ErpAdapter for MockErpAdapter {
    async fn get_order_details(&self, order_id: &str) -> ErpResult<ErpOrderDetails> {
        Ok(ErpOrderDetails {
            order_id: order_id.to_string(),
            order_name: format!("MOCK-ORDER-{}", order_id),
            operations: vec![
                ErpOperation {
                    operation_id: 1,
                    name: "Cutting".to_string(),
                    smv: 3.5,
                },
                ErpOperation {
                    operation_id: 2,
                    name: "Assembly".to_string(),
                    smv: 5.2,
                },
            ],
        })
    }

    async fn get_bom(&self, _order_id: &str) -> ErpResult<Vec<ErpBomLine>> {
        Ok(vec![
            ErpBomLine {
                material_id: 1,
                material_name: "Steel Plate".to_string(),
                qty_required: 10,
            },
            ErpBomLine {
                material_id: 2,
                material_name: "Aluminum Sheet".to_string(),
                qty_required: 5,
            },
        ])
    }

    async fn get_material_availability(
        &self,
        order_id: &str,
    ) -> ErpResult<ErpMaterialAvailability> {
        Ok(ErpMaterialAvailability {
            order_id: order_id.to_string(),
            items: vec![
                ErpAvailabilityItem {
                    material_id: 1,
                    available_qty: 100,
                    required_qty: 10,
                },
                ErpAvailabilityItem {
                    material_id: 2,
                    available_qty: 20,
                    required_qty: 5,
                },
            ],
        })
    }

    async fn get_operation_smv(&self, _order_id: &str, operation_id: i64) -> ErpResult<f64> {
        Ok(match operation_id {
            1 => 3.5,
            2 => 5.2,
            _ => DEFAULT_SMV,
        })
    }
}
