// ==========================================
// 车间生产计划与执行系统 - 物料领域模型
// ==========================================
// 红线: 库存数量只能通过库存更新操作变更，
//       创建仅发生在种子/导入阶段
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Material - 物料库存记录
// ==========================================
// 对齐: materials 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    // ===== 主键 =====
    pub material_id: i64, // 物料唯一标识

    // ===== 基础信息 =====
    pub material_name: String, // 物料名称
    pub stock_qty: i64,        // 当前库存数量（非负整数）
    pub unit: Option<String>,  // 计量单位（pieces / meters / kg ...）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间（库存变更时推进）
}

impl Material {
    /// 构造新物料记录（种子/测试用）
    pub fn new(material_id: i64, material_name: &str, stock_qty: i64, unit: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            material_id,
            material_name: material_name.to_string(),
            stock_qty,
            unit: unit.map(|u| u.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}
