// ==========================================
// 物流订单分配系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 订单到物流中心的批次分配决策
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 分配决策规则
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// 数据库基础设施 (连接初始化/PRAGMA/schema 统一)
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CenterStatus, OrderStatus};

// 领域实体
pub use domain::{AssignmentOutcome, AssignmentRun, Center, Coordinates, Order, RejectionReason};

// 引擎
pub use engine::{AssignmentEngine, AssignmentOrchestrator};

// API
pub use api::{CenterApi, OrderApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "物流订单分配系统";
