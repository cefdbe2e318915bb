// ==========================================
// 物流订单分配系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite
// 用途: 初始化应用状态并执行一次批次分配
// ==========================================

use delivery_assignment::app::{get_default_db_path, AppState};
use delivery_assignment::logging;

#[tokio::main]
async fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 批次分配", delivery_assignment::APP_NAME);
    tracing::info!("系统版本: {}", delivery_assignment::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    // 执行一次批次分配
    match app_state.order_api.assign_pending_orders().await {
        Ok(result) => {
            tracing::info!(
                run_id = %result.run_id,
                processed = result.outcomes.len(),
                assigned = result.assigned_count(),
                rejected = result.rejected_count(),
                "批次分配执行完毕"
            );
            for outcome in &result.outcomes {
                match (&outcome.assigned_center, outcome.distance_km) {
                    (Some(center), Some(distance)) => tracing::info!(
                        order_id = outcome.order_id,
                        center = %center,
                        distance_km = distance,
                        "已分配"
                    ),
                    _ => tracing::warn!(
                        order_id = outcome.order_id,
                        message = outcome.message.as_deref().unwrap_or(""),
                        "未分配"
                    ),
                }
            }
        }
        Err(e) => {
            tracing::error!("批次分配失败: {}", e);
            std::process::exit(1);
        }
    }
}
