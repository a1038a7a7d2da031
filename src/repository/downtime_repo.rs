// ==========================================
// 车间生产计划与执行系统 - 停机记录仓储
// ==========================================
// 红线: 追加式事件记录，创建后不可变更
// 契约: list 按创建时间倒序，limit 截断（默认 200 由边界层给定）
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Result as SqliteResult, Row};

use crate::domain::DowntimeLog;
use crate::repository::error::RepositoryResult;
use crate::repository::{lock_conn, lock_store, parse_datetime};
use crate::storage::StorageBackend;

/// 停机记录写入参数
#[derive(Debug, Clone)]
pub struct NewDowntimeLog {
    pub workstation_id: String,
    pub reason: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

// ==========================================
// DowntimeLogRepository - 停机记录仓储
// ==========================================
pub struct DowntimeLogRepository {
    storage: Arc<StorageBackend>,
}

impl DowntimeLogRepository {
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// 追加一条停机记录
    pub fn insert(&self, entry: NewDowntimeLog) -> RepositoryResult<DowntimeLog> {
        let created_at = Utc::now();
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                conn.execute(
                    "INSERT INTO downtime_logs
                         (workstation_id, reason, start_time, end_time, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        entry.workstation_id,
                        entry.reason,
                        entry.start_time.to_rfc3339(),
                        entry.end_time.map(|t| t.to_rfc3339()),
                        created_at.to_rfc3339(),
                    ],
                )?;
                Ok(DowntimeLog {
                    id: conn.last_insert_rowid(),
                    workstation_id: entry.workstation_id,
                    reason: entry.reason,
                    start_time: entry.start_time,
                    end_time: entry.end_time,
                    created_at,
                })
            }
            StorageBackend::Memory(store) => {
                let log = DowntimeLog {
                    id: store.next_downtime_id(),
                    workstation_id: entry.workstation_id,
                    reason: entry.reason,
                    start_time: entry.start_time,
                    end_time: entry.end_time,
                    created_at,
                };
                lock_store(&store.downtime_logs)?.push(log.clone());
                Ok(log)
            }
        }
    }

    /// 查询最近停机记录（创建时间倒序，limit 截断）
    pub fn list(&self, limit: usize) -> RepositoryResult<Vec<DowntimeLog>> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT id, workstation_id, reason, start_time, end_time, created_at
                     FROM downtime_logs ORDER BY id DESC LIMIT ?1",
                )?;
                let logs = stmt
                    .query_map(params![limit as i64], map_downtime_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                Ok(logs)
            }
            StorageBackend::Memory(store) => {
                let logs = lock_store(&store.downtime_logs)?;
                let mut list: Vec<DowntimeLog> = logs.clone();
                list.sort_by(|a, b| b.id.cmp(&a.id));
                list.truncate(limit);
                Ok(list)
            }
        }
    }
}

/// downtime_logs 行映射
fn map_downtime_row(row: &Row<'_>) -> SqliteResult<DowntimeLog> {
    let end_time = match row.get::<_, Option<String>>(4)? {
        Some(s) => Some(parse_datetime(s, 4)?),
        None => None,
    };
    Ok(DowntimeLog {
        id: row.get(0)?,
        workstation_id: row.get(1)?,
        reason: row.get(2)?,
        start_time: parse_datetime(row.get::<_, String>(3)?, 3)?,
        end_time,
        created_at: parse_datetime(row.get::<_, String>(5)?, 5)?,
    })
}
