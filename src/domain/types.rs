// ==========================================
// 物流订单分配系统 - 领域类型定义
// ==========================================
// 红线: 持久化状态使用枚举,不用自由文本
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 状态机: PENDING → ASSIGNED (单向,仅由分配引擎触发)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,  // 待分配
    Assigned, // 已分配
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Assigned => write!(f, "ASSIGNED"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "ASSIGNED" => Ok(OrderStatus::Assigned),
            other => Err(format!("未知订单状态: {}", other)),
        }
    }
}

// ==========================================
// 中心状态 (Center Status)
// ==========================================
// 外部维护; 引擎只读取 AVAILABLE 中心
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CenterStatus {
    Available,   // 可用
    Unavailable, // 不可用
}

impl fmt::Display for CenterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CenterStatus::Available => write!(f, "AVAILABLE"),
            CenterStatus::Unavailable => write!(f, "UNAVAILABLE"),
        }
    }
}

impl FromStr for CenterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(CenterStatus::Available),
            "UNAVAILABLE" => Ok(CenterStatus::Unavailable),
            other => Err(format!("未知中心状态: {}", other)),
        }
    }
}
