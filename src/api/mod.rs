// ==========================================
// 物流订单分配系统 - API 层
// ==========================================
// 职责: 提供业务接口与边界校验,供上层调用
// 说明: HTTP 路由/鉴权不在本系统范围内
// ==========================================

pub mod center_api;
pub mod error;
pub mod order_api;

// 重导出核心类型
pub use center_api::{CenterApi, CreateCenterRequest};
pub use error::{ApiError, ApiResult};
pub use order_api::{CreateOrderRequest, OrderApi, OrderCreatedResponse};
