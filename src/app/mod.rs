// ==========================================
// 物流订单分配系统 - 应用层
// ==========================================
// 职责: 装配共享状态,提供程序入口依赖
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
