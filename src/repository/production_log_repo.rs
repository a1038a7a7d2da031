// ==========================================
// 车间生产计划与执行系统 - 生产日志仓储
// ==========================================
// 红线: 追加式——只提供 insert / list / 聚合，创建后不可变更
// 契约: list 按业务时间倒序，limit 截断（默认 100 由边界层给定）
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Result as SqliteResult, Row};

use crate::domain::ProductionLog;
use crate::engine::kpi::ProductionTotals;
use crate::repository::error::RepositoryResult;
use crate::repository::{lock_conn, lock_store, parse_datetime};
use crate::storage::StorageBackend;

/// 生产日志写入参数（id / created_at 由仓储生成）
#[derive(Debug, Clone)]
pub struct NewProductionLog {
    pub order_id: i64,
    pub workstation_id: String,
    pub qty_good: i64,
    pub qty_reject: i64,
    pub downtime_minutes: i64,
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// ==========================================
// ProductionLogRepository - 生产日志仓储
// ==========================================
pub struct ProductionLogRepository {
    storage: Arc<StorageBackend>,
}

impl ProductionLogRepository {
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// 追加一条生产日志，返回含生成 id 与写入时间的完整记录
    pub fn insert(&self, entry: NewProductionLog) -> RepositoryResult<ProductionLog> {
        let created_at = Utc::now();
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                conn.execute(
                    "INSERT INTO production_logs
                         (order_id, workstation_id, qty_good, qty_reject,
                          downtime_minutes, reason, timestamp, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        entry.order_id,
                        entry.workstation_id,
                        entry.qty_good,
                        entry.qty_reject,
                        entry.downtime_minutes,
                        entry.reason,
                        entry.timestamp.to_rfc3339(),
                        created_at.to_rfc3339(),
                    ],
                )?;
                let id = conn.last_insert_rowid();
                Ok(build_log(id, entry, created_at))
            }
            StorageBackend::Memory(store) => {
                let log = build_log(store.next_log_id(), entry, created_at);
                lock_store(&store.production_logs)?.push(log.clone());
                Ok(log)
            }
        }
    }

    /// 查询最近日志（业务时间倒序，limit 截断）
    pub fn list(&self, limit: usize) -> RepositoryResult<Vec<ProductionLog>> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT id, order_id, workstation_id, qty_good, qty_reject,
                            downtime_minutes, reason, timestamp, created_at
                     FROM production_logs
                     ORDER BY timestamp DESC, id DESC
                     LIMIT ?1",
                )?;
                let logs = stmt
                    .query_map(params![limit as i64], map_log_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                Ok(logs)
            }
            StorageBackend::Memory(store) => {
                let logs = lock_store(&store.production_logs)?;
                let mut list: Vec<ProductionLog> = logs.clone();
                list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
                list.truncate(limit);
                Ok(list)
            }
        }
    }

    /// 全量累计值（KPI 总览使用）
    pub fn totals(&self) -> RepositoryResult<ProductionTotals> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let totals = conn.query_row(
                    "SELECT COUNT(*),
                            COALESCE(SUM(qty_good), 0),
                            COALESCE(SUM(qty_reject), 0),
                            COALESCE(SUM(downtime_minutes), 0)
                     FROM production_logs",
                    [],
                    |row| {
                        Ok(ProductionTotals {
                            log_count: row.get(0)?,
                            total_good: row.get(1)?,
                            total_reject: row.get(2)?,
                            total_downtime_minutes: row.get(3)?,
                        })
                    },
                )?;
                Ok(totals)
            }
            StorageBackend::Memory(store) => {
                let logs = lock_store(&store.production_logs)?;
                let mut totals = ProductionTotals::default();
                for log in logs.iter() {
                    totals.log_count += 1;
                    totals.total_good += log.qty_good;
                    totals.total_reject += log.qty_reject;
                    totals.total_downtime_minutes += log.downtime_minutes;
                }
                Ok(totals)
            }
        }
    }
}

fn build_log(id: i64, entry: NewProductionLog, created_at: DateTime<Utc>) -> ProductionLog {
    ProductionLog {
        id,
        order_id: entry.order_id,
        workstation_id: entry.workstation_id,
        qty_good: entry.qty_good,
        qty_reject: entry.qty_reject,
        downtime_minutes: entry.downtime_minutes,
        reason: entry.reason,
        timestamp: entry.timestamp,
        created_at,
    }
}

/// production_logs 行映射
fn map_log_row(row: &Row<'_>) -> SqliteResult<ProductionLog> {
    Ok(ProductionLog {
        id: row.get(0)?,
        order_id: row.get(1)?,
        workstation_id: row.get(2)?,
        qty_good: row.get(3)?,
        qty_reject: row.get(4)?,
        downtime_minutes: row.get(5)?,
        reason: row.get(6)?,
        timestamp: parse_datetime(row.get::<_, String>(7)?, 7)?,
        created_at: parse_datetime(row.get::<_, String>(8)?, 8)?,
    })
}
