// ==========================================
// 车间生产计划与执行系统 - HTTP/WebSocket 服务
// ==========================================
// 职责: 路由装配、CORS、监听与启动
// ==========================================

pub mod routes;
pub mod ws;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::app::AppState;
use crate::config::AppConfig;

pub use routes::SharedState;

/// 装配完整路由（REST + WebSocket + CORS）
pub fn build_router(state: Arc<AppState>, config: &AppConfig) -> Router {
    routes::api_router()
        .route("/ws", get(ws::ws_handler))
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}

/// CORS 策略: 未配置来源时全部放行，否则只放行配置的来源
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("忽略无效的 CORS 来源: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// 绑定端口并运行服务，直到进程退出
pub async fn serve(state: Arc<AppState>, config: &AppConfig) -> anyhow::Result<()> {
    let app = build_router(state, config);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HTTP 服务已启动: http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
