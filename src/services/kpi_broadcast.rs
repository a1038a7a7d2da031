// ==========================================
// 车间生产计划与执行系统 - KPI 周期广播
// ==========================================
// 职责: 独立定时任务，周期性推送 KPI 总览
// 约束: 与请求处理完全解耦；单次失败只记日志，不影响后续 tick
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::api::DashboardApi;
use crate::services::events::{EventBus, WsEvent};

/// 启动 KPI 周期广播任务
///
/// # 参数
/// - dashboard_api: KPI 聚合查询入口
/// - events: 事件总线
/// - interval_secs: 推送间隔（秒）
pub fn spawn_kpi_broadcast(
    dashboard_api: Arc<DashboardApi>,
    events: EventBus,
    interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // interval 的首个 tick 立即完成，先消费掉
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match dashboard_api.kpi_overview() {
                Ok(kpi) => events.publish(&WsEvent::KpiUpdate { kpi }),
                Err(e) => {
                    tracing::warn!("KPI 广播本轮跳过: {}", e);
                }
            }
        }
    })
}
