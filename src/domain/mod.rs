// ==========================================
// 物流订单分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod center;
pub mod order;
pub mod types;

// 重导出核心类型
pub use assignment::{AssignmentOutcome, AssignmentRun, RejectionReason};
pub use center::Center;
pub use order::{Coordinates, Order};
pub use types::{CenterStatus, OrderStatus};
