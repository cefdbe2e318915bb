// ==========================================
// 物流订单分配系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{CenterApi, OrderApi};
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::engine::AssignmentOrchestrator;
use crate::repository::{AssignmentLogRepository, CenterRepository, OrderRepository};

/// 应用状态
///
/// 持有共享数据库连接及其上构建的仓储/API 实例
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 订单 API
    pub order_api: Arc<OrderApi>,

    /// 物流中心 API
    pub center_api: Arc<CenterApi>,

    /// 运行审计仓储 (用于查询批次历史)
    pub assignment_log_repo: Arc<AssignmentLogRepository>,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// 打开共享连接, 初始化 schema, 装配仓储与 API
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState,数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("schema 初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 仓储装配 (共享同一连接)
        // ==========================================
        let order_repo = Arc::new(OrderRepository::from_connection(conn.clone()));
        let center_repo = Arc::new(CenterRepository::from_connection(conn.clone()));
        let assignment_log_repo = Arc::new(AssignmentLogRepository::from_connection(conn));

        // ==========================================
        // 引擎与 API 装配
        // ==========================================
        let orchestrator = Arc::new(AssignmentOrchestrator::new(
            order_repo.clone(),
            center_repo.clone(),
            assignment_log_repo.clone(),
        ));

        let order_api = Arc::new(OrderApi::new(order_repo, orchestrator));
        let center_api = Arc::new(CenterApi::new(center_repo));

        tracing::info!("AppState初始化成功");

        Ok(Self {
            db_path,
            order_api,
            center_api,
            assignment_log_repo,
        })
    }

    /// 打开一个仅用于测试的内存数据库状态
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, String> {
        Self::new(":memory:".to_string())
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 DELIVERY_ASSIGN_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径 (便于调试/测试/CI)
    if let Ok(path) = std::env::var("DELIVERY_ASSIGN_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("delivery-assignment.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("delivery-assignment");
        // 确保目录存在; 失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("delivery-assignment.db");
        }
    }

    path.to_string_lossy().to_string()
}
