// ==========================================
// 车间生产计划与执行系统 - 实时事件总线
// ==========================================
// 职责: 变更事件与周期 KPI 推送的进程内广播
// 约束: 发布失败（无订阅者/序列化失败）只记日志，
//       绝不影响发布方的请求处理
// ==========================================

use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::{Material, OrderView, ProductionLog};
use crate::engine::kpi::KpiOverview;

/// 广播通道容量（慢订阅者超出后丢弃最旧消息）
const CHANNEL_CAPACITY: usize = 256;

// ==========================================
// WsEvent - 对外事件（JSON: {"type": ..., "data": ...}）
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsEvent {
    /// 连接建立问候（仅对新连接单发）
    #[serde(rename = "connected")]
    Connected { ts: i64 },

    /// 物料库存变更
    #[serde(rename = "materials:update")]
    MaterialsUpdate { material: Material },

    /// 订单变更（含重算后的缺料标志）
    #[serde(rename = "orders:update")]
    OrdersUpdate { order: OrderView },

    /// 新生产日志
    #[serde(rename = "logs:new")]
    LogsNew { log: ProductionLog },

    /// 周期 KPI 推送
    #[serde(rename = "kpi:update")]
    KpiUpdate { kpi: KpiOverview },
}

impl WsEvent {
    /// 序列化为 WebSocket 文本帧载荷
    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!("事件序列化失败: {}", e);
                None
            }
        }
    }
}

// ==========================================
// EventBus - 广播总线
// ==========================================
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<String>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// 发布事件（无订阅者时静默丢弃）
    pub fn publish(&self, event: &WsEvent) {
        if let Some(json) = event.to_json() {
            let _ = self.tx.send(json);
        }
    }

    /// 订阅事件流（每个 WebSocket 连接一个接收端）
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_事件类型标签与前端契约一致() {
        let material = Material::new(1, "Steel Plate", 15, Some("pieces"));
        let json = WsEvent::MaterialsUpdate { material }.to_json().unwrap();
        assert!(json.contains(r#""type":"materials:update""#));

        let json = WsEvent::Connected { ts: Utc::now().timestamp_millis() }
            .to_json()
            .unwrap();
        assert!(json.contains(r#""type":"connected""#));
    }

    #[tokio::test]
    async fn test_发布到多个订阅者() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let material = Material::new(2, "Aluminum Sheet", 8, None);
        bus.publish(&WsEvent::MaterialsUpdate { material });

        let received1 = rx1.recv().await.unwrap();
        let received2 = rx2.recv().await.unwrap();
        assert_eq!(received1, received2);
        assert!(received1.contains("Aluminum Sheet"));
    }

    #[test]
    fn test_无订阅者发布不报错() {
        let bus = EventBus::new();
        bus.publish(&WsEvent::Connected { ts: 0 });
    }
}
