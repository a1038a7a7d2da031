// ==========================================
// 车间生产计划与执行系统 - 物料仓储
// ==========================================
// 红线: Repository 不含业务校验（stock_qty 非负由边界层保证）
// 契约: 两种后端返回形状与排序完全一致
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};

use crate::domain::Material;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{lock_conn, lock_store, parse_datetime};
use crate::storage::StorageBackend;

// ==========================================
// MaterialRepository - 物料仓储
// ==========================================
pub struct MaterialRepository {
    storage: Arc<StorageBackend>,
}

impl MaterialRepository {
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// 查询全部物料（按名称升序）
    pub fn list(&self) -> RepositoryResult<Vec<Material>> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT material_id, material_name, stock_qty, unit, created_at, updated_at
                     FROM materials ORDER BY material_name ASC",
                )?;
                let materials = stmt
                    .query_map([], map_material_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                Ok(materials)
            }
            StorageBackend::Memory(store) => {
                let materials = lock_store(&store.materials)?;
                let mut list: Vec<Material> = materials.clone();
                list.sort_by(|a, b| a.material_name.cmp(&b.material_name));
                Ok(list)
            }
        }
    }

    /// 按 material_id 查询单个物料
    pub fn get(&self, material_id: i64) -> RepositoryResult<Material> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT material_id, material_name, stock_qty, unit, created_at, updated_at
                     FROM materials WHERE material_id = ?1",
                )?;
                match stmt.query_row(params![material_id], map_material_row) {
                    Ok(m) => Ok(m),
                    Err(rusqlite::Error::QueryReturnedNoRows) => {
                        Err(RepositoryError::not_found("Material", material_id))
                    }
                    Err(e) => Err(e.into()),
                }
            }
            StorageBackend::Memory(store) => {
                let materials = lock_store(&store.materials)?;
                materials
                    .iter()
                    .find(|m| m.material_id == material_id)
                    .cloned()
                    .ok_or_else(|| RepositoryError::not_found("Material", material_id))
            }
        }
    }

    /// 更新库存数量（同时推进 updated_at）
    ///
    /// # 返回
    /// - Ok(Material): 更新后的完整记录
    /// - Err(NotFound): 标识不存在（两种后端行为一致）
    pub fn update_stock(&self, material_id: i64, stock_qty: i64) -> RepositoryResult<Material> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                {
                    let conn = lock_conn(conn)?;
                    let now = Utc::now().to_rfc3339();
                    let rows = conn.execute(
                        "UPDATE materials SET stock_qty = ?1, updated_at = ?2 WHERE material_id = ?3",
                        params![stock_qty, now, material_id],
                    )?;
                    if rows == 0 {
                        return Err(RepositoryError::not_found("Material", material_id));
                    }
                }
                self.get(material_id)
            }
            StorageBackend::Memory(store) => {
                let mut materials = lock_store(&store.materials)?;
                let material = materials
                    .iter_mut()
                    .find(|m| m.material_id == material_id)
                    .ok_or_else(|| RepositoryError::not_found("Material", material_id))?;
                material.stock_qty = stock_qty;
                material.updated_at = Utc::now();
                Ok(material.clone())
            }
        }
    }
}

/// materials 行映射
fn map_material_row(row: &Row<'_>) -> SqliteResult<Material> {
    Ok(Material {
        material_id: row.get(0)?,
        material_name: row.get(1)?,
        stock_qty: row.get(2)?,
        unit: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?, 4)?,
        updated_at: parse_datetime(row.get::<_, String>(5)?, 5)?,
    })
}
