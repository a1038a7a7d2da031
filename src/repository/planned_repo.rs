// ==========================================
// 车间生产计划与执行系统 - 计划生产仓储
// ==========================================
// 职责: 计划生产条目的增删改查（看板拖拽落库的持久化端）
// 契约: list 按 planned_date 升序，limit 截断（默认 200 由边界层给定）
// 说明: update 为 COALESCE 语义——未提供的字段保留原值
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Result as SqliteResult, Row};

use crate::domain::types::PlannedStatus;
use crate::domain::{PlannedProduction, PlannedProductionPatch};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{lock_conn, lock_store, parse_date, parse_datetime};
use crate::storage::StorageBackend;

/// 计划生产条目写入参数（id / 审计字段由仓储生成）
#[derive(Debug, Clone)]
pub struct NewPlannedProduction {
    pub order_id: i64,
    pub planned_date: chrono::NaiveDate,
    pub quantity: i64,
    pub workstation_id: Option<String>,
    pub status: Option<PlannedStatus>, // None → 默认 planned
}

// ==========================================
// PlannedProductionRepository - 计划生产仓储
// ==========================================
pub struct PlannedProductionRepository {
    storage: Arc<StorageBackend>,
}

impl PlannedProductionRepository {
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// 查询计划生产条目（planned_date 升序，limit 截断）
    pub fn list(&self, limit: usize) -> RepositoryResult<Vec<PlannedProduction>> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT id, order_id, planned_date, quantity, workstation_id,
                            status, created_at, updated_at
                     FROM planned_production
                     ORDER BY planned_date ASC, id ASC
                     LIMIT ?1",
                )?;
                let entries = stmt
                    .query_map(params![limit as i64], map_planned_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                Ok(entries)
            }
            StorageBackend::Memory(store) => {
                let planned = lock_store(&store.planned)?;
                let mut list: Vec<PlannedProduction> = planned.clone();
                list.sort_by(|a, b| a.planned_date.cmp(&b.planned_date).then(a.id.cmp(&b.id)));
                list.truncate(limit);
                Ok(list)
            }
        }
    }

    /// 创建计划生产条目
    pub fn create(&self, entry: NewPlannedProduction) -> RepositoryResult<PlannedProduction> {
        let now = Utc::now();
        let status = entry.status.unwrap_or_default();
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                conn.execute(
                    "INSERT INTO planned_production
                         (order_id, planned_date, quantity, workstation_id, status,
                          created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        entry.order_id,
                        entry.planned_date.to_string(),
                        entry.quantity,
                        entry.workstation_id,
                        status.as_str(),
                        now.to_rfc3339(),
                        now.to_rfc3339(),
                    ],
                )?;
                let id = conn.last_insert_rowid();
                Ok(build_planned(id, entry, status, now))
            }
            StorageBackend::Memory(store) => {
                let item = build_planned(store.next_planned_id(), entry, status, now);
                lock_store(&store.planned)?.push(item.clone());
                Ok(item)
            }
        }
    }

    /// 部分更新计划生产条目（None 字段保留原值），返回更新后的记录
    pub fn update(
        &self,
        id: i64,
        patch: PlannedProductionPatch,
    ) -> RepositoryResult<PlannedProduction> {
        let now = Utc::now();
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let rows = {
                    let conn = lock_conn(conn)?;
                    conn.execute(
                        "UPDATE planned_production SET
                             order_id       = COALESCE(?2, order_id),
                             planned_date   = COALESCE(?3, planned_date),
                             quantity       = COALESCE(?4, quantity),
                             workstation_id = COALESCE(?5, workstation_id),
                             status         = COALESCE(?6, status),
                             updated_at     = ?7
                         WHERE id = ?1",
                        params![
                            id,
                            patch.order_id,
                            patch.planned_date.map(|d| d.to_string()),
                            patch.quantity,
                            patch.workstation_id,
                            patch.status.map(|s| s.as_str().to_string()),
                            now.to_rfc3339(),
                        ],
                    )?
                };
                if rows == 0 {
                    return Err(RepositoryError::not_found("PlannedProduction", id));
                }
                self.get(id)
            }
            StorageBackend::Memory(store) => {
                let mut planned = lock_store(&store.planned)?;
                let item = planned
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| RepositoryError::not_found("PlannedProduction", id))?;
                if let Some(order_id) = patch.order_id {
                    item.order_id = order_id;
                }
                if let Some(date) = patch.planned_date {
                    item.planned_date = date;
                }
                if let Some(quantity) = patch.quantity {
                    item.quantity = quantity;
                }
                if let Some(workstation_id) = patch.workstation_id {
                    item.workstation_id = Some(workstation_id);
                }
                if let Some(status) = patch.status {
                    item.status = status;
                }
                item.updated_at = now;
                Ok(item.clone())
            }
        }
    }

    /// 删除计划生产条目
    ///
    /// # 返回
    /// - Ok(true): 删除成功
    /// - Ok(false): 标识不存在（与原契约一致，不作为错误）
    pub fn delete(&self, id: i64) -> RepositoryResult<bool> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let rows = conn.execute("DELETE FROM planned_production WHERE id = ?1", params![id])?;
                Ok(rows > 0)
            }
            StorageBackend::Memory(store) => {
                let mut planned = lock_store(&store.planned)?;
                let before = planned.len();
                planned.retain(|p| p.id != id);
                Ok(planned.len() < before)
            }
        }
    }

    /// 按 id 查询单个条目
    pub fn get(&self, id: i64) -> RepositoryResult<PlannedProduction> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT id, order_id, planned_date, quantity, workstation_id,
                            status, created_at, updated_at
                     FROM planned_production WHERE id = ?1",
                )?;
                match stmt.query_row(params![id], map_planned_row) {
                    Ok(item) => Ok(item),
                    Err(rusqlite::Error::QueryReturnedNoRows) => {
                        Err(RepositoryError::not_found("PlannedProduction", id))
                    }
                    Err(e) => Err(e.into()),
                }
            }
            StorageBackend::Memory(store) => {
                let planned = lock_store(&store.planned)?;
                planned
                    .iter()
                    .find(|p| p.id == id)
                    .cloned()
                    .ok_or_else(|| RepositoryError::not_found("PlannedProduction", id))
            }
        }
    }
}

fn build_planned(
    id: i64,
    entry: NewPlannedProduction,
    status: PlannedStatus,
    now: DateTime<Utc>,
) -> PlannedProduction {
    PlannedProduction {
        id,
        order_id: entry.order_id,
        planned_date: entry.planned_date,
        quantity: entry.quantity,
        workstation_id: entry.workstation_id,
        status,
        created_at: now,
        updated_at: now,
    }
}

/// planned_production 行映射
fn map_planned_row(row: &Row<'_>) -> SqliteResult<PlannedProduction> {
    Ok(PlannedProduction {
        id: row.get(0)?,
        order_id: row.get(1)?,
        planned_date: parse_date(row.get::<_, String>(2)?, 2)?,
        quantity: row.get(3)?,
        workstation_id: row.get(4)?,
        status: PlannedStatus::from_str(&row.get::<_, String>(5)?),
        created_at: parse_datetime(row.get::<_, String>(6)?, 6)?,
        updated_at: parse_datetime(row.get::<_, String>(7)?, 7)?,
    })
}
