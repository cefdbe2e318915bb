// ==========================================
// 物流订单分配系统 - 引擎层
// ==========================================
// 职责: 实现分配决策规则,不拼 SQL
// 红线: Engine 不拼 SQL, 所有拒绝必须输出 reason
// ==========================================

pub mod assignment;
pub mod assignment_core;
pub mod distance;
pub mod orchestrator;

// 重导出核心引擎
pub use assignment::AssignmentEngine;
pub use assignment_core::{AssignmentCore, Decision};
pub use distance::{haversine_km, EARTH_RADIUS_M};
pub use orchestrator::{AssignmentBatchResult, AssignmentOrchestrator};
