// ==========================================
// 车间生产计划与执行系统 - 告警仓储
// ==========================================
// 红线: 追加式事件记录，创建后不可变更
// 契约: list 按创建时间倒序，limit 截断（默认 200 由边界层给定）
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};

use crate::domain::types::AlertLevel;
use crate::domain::Alert;
use crate::repository::error::RepositoryResult;
use crate::repository::{lock_conn, lock_store, parse_datetime};
use crate::storage::StorageBackend;

// ==========================================
// AlertRepository - 告警仓储
// ==========================================
pub struct AlertRepository {
    storage: Arc<StorageBackend>,
}

impl AlertRepository {
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// 追加一条告警（acknowledged 恒为 false）
    pub fn insert(&self, level: AlertLevel, message: &str) -> RepositoryResult<Alert> {
        let created_at = Utc::now();
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                conn.execute(
                    "INSERT INTO alerts (level, message, acknowledged, created_at)
                     VALUES (?1, ?2, 0, ?3)",
                    params![level.as_str(), message, created_at.to_rfc3339()],
                )?;
                Ok(Alert {
                    id: conn.last_insert_rowid(),
                    level,
                    message: message.to_string(),
                    acknowledged: false,
                    created_at,
                })
            }
            StorageBackend::Memory(store) => {
                let alert = Alert {
                    id: store.next_alert_id(),
                    level,
                    message: message.to_string(),
                    acknowledged: false,
                    created_at,
                };
                lock_store(&store.alerts)?.push(alert.clone());
                Ok(alert)
            }
        }
    }

    /// 查询最近告警（创建时间倒序，limit 截断）
    pub fn list(&self, limit: usize) -> RepositoryResult<Vec<Alert>> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT id, level, message, acknowledged, created_at
                     FROM alerts ORDER BY id DESC LIMIT ?1",
                )?;
                let alerts = stmt
                    .query_map(params![limit as i64], map_alert_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                Ok(alerts)
            }
            StorageBackend::Memory(store) => {
                let alerts = lock_store(&store.alerts)?;
                let mut list: Vec<Alert> = alerts.clone();
                list.sort_by(|a, b| b.id.cmp(&a.id));
                list.truncate(limit);
                Ok(list)
            }
        }
    }
}

/// alerts 行映射
fn map_alert_row(row: &Row<'_>) -> SqliteResult<Alert> {
    Ok(Alert {
        id: row.get(0)?,
        level: AlertLevel::from_str(&row.get::<_, String>(1)?),
        message: row.get(2)?,
        acknowledged: row.get::<_, i64>(3)? != 0,
        created_at: parse_datetime(row.get::<_, String>(4)?, 4)?,
    })
}
