// ==========================================
// 物流订单分配系统 - 订单 API
// ==========================================
// 职责: 订单创建/查询的边界校验与编排入口
// 说明: 非 HTTP 层; 路由与鉴权在本系统范围之外
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::{Coordinates, Order};
use crate::domain::types::OrderStatus;
use crate::engine::orchestrator::{AssignmentBatchResult, AssignmentOrchestrator};
use crate::repository::OrderRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ==========================================
// 请求/响应 DTO
// ==========================================

/// 创建订单请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: i64,
    pub size: String,
    pub coordinates: Coordinates,
}

/// 创建订单响应
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: i64,
    pub customer_id: i64,
    pub size: String,
    pub assigned_logistics_center: Option<String>,
    pub coordinates: Coordinates,
    pub status: OrderStatus,
    pub message: String,
}

// ==========================================
// OrderApi - 订单业务接口
// ==========================================

pub struct OrderApi {
    order_repo: Arc<OrderRepository>,
    orchestrator: Arc<AssignmentOrchestrator>,
}

impl OrderApi {
    pub fn new(
        order_repo: Arc<OrderRepository>,
        orchestrator: Arc<AssignmentOrchestrator>,
    ) -> Self {
        Self {
            order_repo,
            orchestrator,
        }
    }

    /// 创建新订单 (PENDING 状态,无分配中心)
    ///
    /// # 校验
    /// - size 非空
    /// - 坐标在经纬度合法范围内
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> ApiResult<OrderCreatedResponse> {
        if request.size.trim().is_empty() {
            return Err(ApiError::InvalidInput("订单尺寸类别不能为空".to_string()));
        }
        if !request.coordinates.is_valid() {
            return Err(ApiError::InvalidInput(format!(
                "坐标超出合法范围: lat={}, lon={}",
                request.coordinates.latitude, request.coordinates.longitude
            )));
        }

        let mut order = Order::new_pending(
            request.customer_id,
            request.size.trim().to_string(),
            request.coordinates,
        );
        order.id = self.order_repo.insert(&order)?;

        info!(order_id = order.id, size = %order.size, "订单创建成功");

        Ok(OrderCreatedResponse {
            order_id: order.id,
            customer_id: order.customer_id,
            size: order.size,
            assigned_logistics_center: None,
            coordinates: order.coordinates,
            status: order.status,
            message: "Order created successfully in PENDING status.".to_string(),
        })
    }

    /// 查询全部订单
    pub async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.order_repo.find_all()?)
    }

    /// 对全部 PENDING 订单执行一次批次分配
    ///
    /// 引擎对外暴露的唯一分配入口;
    /// 返回与 PENDING 订单同序的结果记录列表
    pub async fn assign_pending_orders(&self) -> ApiResult<AssignmentBatchResult> {
        Ok(self.orchestrator.run_assignment().await?)
    }
}
