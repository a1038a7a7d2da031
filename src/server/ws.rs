// ==========================================
// 车间生产计划与执行系统 - WebSocket 推送
// ==========================================
// 职责: 连接升级、问候帧、事件总线转发
// 约束: 连接只读事件流；客户端来帧除 Close 外一律忽略
// ==========================================

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::server::routes::SharedState;
use crate::services::events::WsEvent;

/// GET /ws - 升级为 WebSocket 连接
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> Response {
    let rx = state.events.subscribe();
    ws.on_upgrade(move |socket| run_socket_loop(socket, rx))
}

/// 单连接事件循环
///
/// 建立后先单发 connected 问候帧，之后把总线广播原样转发；
/// 慢消费导致的 Lagged 跳过积压继续，发送失败视为连接断开。
async fn run_socket_loop(socket: WebSocket, mut rx: broadcast::Receiver<String>) {
    let (mut sender, mut receiver) = socket.split();

    let greeting = WsEvent::Connected {
        ts: Utc::now().timestamp_millis(),
    };
    if let Some(json) = greeting.to_json() {
        if sender.send(Message::Text(json.into())).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("WebSocket 订阅积压，跳过 {} 条事件", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // 心跳帧由框架自动应答，其余来帧忽略
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("WebSocket 连接关闭");
}
