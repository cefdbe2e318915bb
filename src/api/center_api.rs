// ==========================================
// 物流订单分配系统 - 物流中心 API
// ==========================================
// 职责: 中心创建/查询/状态维护的边界校验
// 红线: current_load 不得超过 max_capacity
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::center::Center;
use crate::domain::order::Coordinates;
use crate::domain::types::CenterStatus;
use crate::repository::CenterRepository;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// ==========================================
// 请求 DTO
// ==========================================

/// 创建中心请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCenterRequest {
    pub name: String,
    pub coordinates: Coordinates,
    pub capability: Vec<String>,
    pub max_capacity: i64,
    pub current_load: i64,
    pub status: CenterStatus,
}

// ==========================================
// CenterApi - 物流中心业务接口
// ==========================================

pub struct CenterApi {
    center_repo: Arc<CenterRepository>,
}

impl CenterApi {
    pub fn new(center_repo: Arc<CenterRepository>) -> Self {
        Self { center_repo }
    }

    /// 创建新中心
    ///
    /// # 校验
    /// - name 非空, capability 非空且标签非空白
    /// - max_capacity >= 0, 0 <= current_load <= max_capacity
    /// - 坐标在经纬度合法范围内
    pub async fn create_center(&self, request: CreateCenterRequest) -> ApiResult<i64> {
        if request.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("中心名称不能为空".to_string()));
        }
        if request.capability.is_empty()
            || request.capability.iter().any(|s| s.trim().is_empty())
        {
            return Err(ApiError::InvalidInput(
                "能力集合不能为空且标签不能为空白".to_string(),
            ));
        }
        if request.max_capacity < 0 {
            return Err(ApiError::InvalidInput(format!(
                "最大容量不能为负: {}",
                request.max_capacity
            )));
        }
        if request.current_load < 0 || request.current_load > request.max_capacity {
            return Err(ApiError::InvalidInput(format!(
                "当前负载必须在 [0, {}] 范围内: {}",
                request.max_capacity, request.current_load
            )));
        }
        if !request.coordinates.is_valid() {
            return Err(ApiError::InvalidInput(format!(
                "坐标超出合法范围: lat={}, lon={}",
                request.coordinates.latitude, request.coordinates.longitude
            )));
        }

        let mut center = Center::new(
            request.name.trim().to_string(),
            request.coordinates,
            request.capability,
            request.max_capacity,
            request.current_load,
            request.status,
        );
        center.id = self.center_repo.insert(&center)?;

        info!(
            center_id = center.id,
            name = %center.name,
            max_capacity = center.max_capacity,
            "物流中心创建成功"
        );

        Ok(center.id)
    }

    /// 查询全部中心
    pub async fn list_centers(&self) -> ApiResult<Vec<Center>> {
        Ok(self.center_repo.find_all()?)
    }

    /// 更新中心可用状态
    pub async fn update_center_status(&self, id: i64, status: CenterStatus) -> ApiResult<()> {
        self.center_repo.update_status(id, status)?;
        info!(center_id = id, status = %status, "中心状态已更新");
        Ok(())
    }
}
