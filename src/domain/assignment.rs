// ==========================================
// 物流订单分配系统 - 分配结果领域模型
// ==========================================
// 红线: 拒绝原因建模为数据,不走异常控制流
// 红线: 所有结果必须输出可解释的 message
// ==========================================

use crate::domain::types::OrderStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// RejectionReason - 拒绝原因
// ==========================================
// 两类拒绝: 无中心支持该尺寸 / 支持的中心全部满载
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    NoCapableCenter,     // 无可用中心支持该订单类型
    NoCapacityAvailable, // 所有支持的中心均已满载
}

impl RejectionReason {
    /// 面向用户的拒绝消息 (与源系统响应文案一致)
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::NoCapableCenter => "No available centers support the order type.",
            RejectionReason::NoCapacityAvailable => "All centers are at maximum capacity.",
        }
    }
}

// ==========================================
// AssignmentOutcome - 单订单分配结果记录
// ==========================================
// 不变量: 订单被分配 当且仅当 assigned_center 与 distance_km 同时非空
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub order_id: i64,                   // 订单标识
    pub status: OrderStatus,             // 处理后状态
    pub assigned_center: Option<String>, // 分配的中心名称 (拒绝时为空)
    pub distance_km: Option<f64>,        // 到分配中心的距离 (公里, 拒绝时为空)
    pub message: Option<String>,         // 拒绝原因消息 (仅拒绝时存在)
}

impl AssignmentOutcome {
    /// 构造已分配结果
    pub fn assigned(order_id: i64, center_name: &str, distance_km: f64) -> Self {
        Self {
            order_id,
            status: OrderStatus::Assigned,
            assigned_center: Some(center_name.to_string()),
            distance_km: Some(distance_km),
            message: None,
        }
    }

    /// 构造拒绝结果 (订单保持 PENDING)
    pub fn rejected(order_id: i64, reason: RejectionReason) -> Self {
        Self {
            order_id,
            status: OrderStatus::Pending,
            assigned_center: None,
            distance_km: None,
            message: Some(reason.message().to_string()),
        }
    }

    /// 是否为成功分配结果
    pub fn is_assigned(&self) -> bool {
        self.status == OrderStatus::Assigned
    }
}

// ==========================================
// AssignmentRun - 批次运行审计记录
// ==========================================
// 对齐: assignment_runs 表 (追加写,不更新)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRun {
    pub run_id: String,                       // 运行标识 (UUID v4)
    pub processed_count: i64,                 // 处理订单总数
    pub assigned_count: i64,                  // 成功分配数
    pub rejected_count: i64,                  // 拒绝数
    pub executed_at: chrono::DateTime<chrono::Utc>, // 执行时间
}
