// ==========================================
// 物流订单分配系统 - 订单领域模型
// ==========================================
// 用途: API 层创建, 分配引擎读写状态
// 红线: 状态转换 PENDING → ASSIGNED 仅发生一次,
//       且仅由分配引擎执行
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Coordinates - 地理坐标
// ==========================================
// 单位: 度 (WGS84 经纬度)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,  // 纬度 [-90, 90]
    pub longitude: f64, // 经度 [-180, 180]
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// 坐标范围校验 (边界层使用,引擎不重复校验)
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

// ==========================================
// Order - 订单实体
// ==========================================
// 对齐: orders 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub id: i64, // 订单唯一标识 (自增)

    // ===== 基础信息 =====
    pub customer_id: i64,          // 客户标识
    pub size: String,              // 尺寸类别标签 (创建后不可变)
    pub coordinates: Coordinates,  // 配送目的地坐标

    // ===== 分配状态 (由分配引擎写入) =====
    pub status: OrderStatus,                 // PENDING / ASSIGNED
    pub assigned_center: Option<String>,     // 已分配中心名称 (仅 ASSIGNED 非空)

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl Order {
    /// 创建 PENDING 状态的新订单 (id 由仓储层回填)
    pub fn new_pending(customer_id: i64, size: String, coordinates: Coordinates) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            customer_id,
            size,
            coordinates,
            status: OrderStatus::Pending,
            assigned_center: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 是否待分配
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// 提交分配结果: 状态置 ASSIGNED 并记录中心名称
    ///
    /// 不变量: 订单为 ASSIGNED 当且仅当 assigned_center 非空
    pub fn assign_to(&mut self, center_name: &str) {
        self.status = OrderStatus::Assigned;
        self.assigned_center = Some(center_name.to_string());
        self.updated_at = Utc::now();
    }
}
