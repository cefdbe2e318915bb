// ==========================================
// 物流订单分配系统 - 物流中心领域模型
// ==========================================
// 用途: API 层创建维护, 分配引擎读取并更新负载
// 红线: current_load 不得超过 max_capacity
// ==========================================

use crate::domain::order::Coordinates;
use crate::domain::types::CenterStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Center - 物流中心实体
// ==========================================
// 对齐: centers 表 (capability 以 JSON 数组存储)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    // ===== 主键 =====
    pub id: i64, // 中心唯一标识 (自增)

    // ===== 基础信息 =====
    pub name: String,             // 中心名称 (分配结果中引用)
    pub coordinates: Coordinates, // 中心坐标

    // ===== 能力与容量 =====
    pub capability: Vec<String>, // 支持的尺寸类别集合
    pub max_capacity: i64,       // 最大容量 (>= 0)
    pub current_load: i64,       // 当前负载 (>= 0, 成功分配后 <= max_capacity)

    // ===== 可用状态 (外部维护) =====
    pub status: CenterStatus, // AVAILABLE / UNAVAILABLE

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl Center {
    /// 创建新中心 (id 由仓储层回填)
    pub fn new(
        name: String,
        coordinates: Coordinates,
        capability: Vec<String>,
        max_capacity: i64,
        current_load: i64,
        status: CenterStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            coordinates,
            capability,
            max_capacity,
            current_load,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// 是否支持指定尺寸类别
    pub fn supports(&self, size: &str) -> bool {
        self.capability.iter().any(|s| s == size)
    }

    /// 是否仍有剩余容量
    pub fn has_spare_capacity(&self) -> bool {
        self.current_load < self.max_capacity
    }

    /// 负载加一 (由分配引擎在提交阶段调用)
    ///
    /// 不变量: 调用前必须通过 has_spare_capacity 检查
    pub fn increment_load(&mut self) {
        self.current_load += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_center(capability: Vec<&str>, max_capacity: i64, current_load: i64) -> Center {
        Center::new(
            "Centro Test".to_string(),
            Coordinates::new(41.4, 2.2),
            capability.into_iter().map(String::from).collect(),
            max_capacity,
            current_load,
            CenterStatus::Available,
        )
    }

    #[test]
    fn test_supports_exact_tag_only() {
        let center = test_center(vec!["M", "S"], 5, 0);
        assert!(center.supports("M"));
        assert!(center.supports("S"));
        assert!(!center.supports("B"));
        assert!(!center.supports("m"));
    }

    #[test]
    fn test_spare_capacity_boundary() {
        let center = test_center(vec!["S"], 2, 1);
        assert!(center.has_spare_capacity());

        let full = test_center(vec!["S"], 2, 2);
        assert!(!full.has_spare_capacity());

        let zero = test_center(vec!["S"], 0, 0);
        assert!(!zero.has_spare_capacity());
    }

    #[test]
    fn test_increment_load() {
        let mut center = test_center(vec!["B"], 3, 2);
        center.increment_load();
        assert_eq!(center.current_load, 3);
        assert!(!center.has_spare_capacity());
    }
}
