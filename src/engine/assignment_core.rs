// ==========================================
// 物流订单分配系统 - 分配决策纯函数核心
// ==========================================
// 职责: 单订单的资格过滤、容量过滤、最近中心选择
// 红线: 无状态、无副作用、无 I/O 操作
// 红线: 每个输入组合都产出确定的决策,不抛异常
// ==========================================

use crate::domain::assignment::RejectionReason;
use crate::domain::center::Center;
use crate::domain::order::Order;
use crate::engine::distance::haversine_km;

// ==========================================
// Decision - 单订单决策结果
// ==========================================
// 接受时携带中心在快照中的下标,由上层执行提交
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Accept {
        center_index: usize, // 入选中心在候选快照中的下标
        distance_km: f64,    // 到入选中心的大圆距离
    },
    Reject(RejectionReason),
}

// ==========================================
// AssignmentCore - 纯函数工具类
// ==========================================
pub struct AssignmentCore;

impl AssignmentCore {
    /// 对单个订单做分配决策
    ///
    /// # 规则 (顺序固定)
    /// 1. 资格过滤: 中心 capability 包含订单 size, 否则 NoCapableCenter
    /// 2. 容量过滤: current_load < max_capacity, 否则 NoCapacityAvailable
    /// 3. 最近选择: 严格最小 haversine 距离, 相等时先遇到者胜出
    ///
    /// 中心快照为空时,资格过滤从空集合开始,
    /// 等价于 NoCapableCenter (无需特判)。
    ///
    /// # 参数
    /// - order: 待决策订单
    /// - centers: 可用中心快照 (顺序固定,决定平局归属)
    ///
    /// # 返回
    /// - Decision: 接受 (中心下标 + 距离) 或拒绝 (原因)
    pub fn decide(order: &Order, centers: &[Center]) -> Decision {
        // 规则 1: 资格过滤
        let capable: Vec<usize> = (0..centers.len())
            .filter(|&i| centers[i].supports(&order.size))
            .collect();

        if capable.is_empty() {
            return Decision::Reject(RejectionReason::NoCapableCenter);
        }

        // 规则 2: 容量过滤
        let with_capacity: Vec<usize> = capable
            .into_iter()
            .filter(|&i| centers[i].has_spare_capacity())
            .collect();

        if with_capacity.is_empty() {
            return Decision::Reject(RejectionReason::NoCapacityAvailable);
        }

        // 规则 3: 最近中心选择 (严格 < 比较, 平局先遇到者胜出)
        let mut best_index = with_capacity[0];
        let mut best_distance = haversine_km(&order.coordinates, &centers[best_index].coordinates);

        for &i in &with_capacity[1..] {
            let d = haversine_km(&order.coordinates, &centers[i].coordinates);
            if d < best_distance {
                best_index = i;
                best_distance = d;
            }
        }

        Decision::Accept {
            center_index: best_index,
            distance_km: best_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::Coordinates;
    use crate::domain::types::CenterStatus;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn test_order(size: &str, lat: f64, lon: f64) -> Order {
        Order::new_pending(1, size.to_string(), Coordinates::new(lat, lon))
    }

    fn test_center(
        name: &str,
        capability: Vec<&str>,
        max_capacity: i64,
        current_load: i64,
        lat: f64,
        lon: f64,
    ) -> Center {
        Center::new(
            name.to_string(),
            Coordinates::new(lat, lon),
            capability.into_iter().map(String::from).collect(),
            max_capacity,
            current_load,
            CenterStatus::Available,
        )
    }

    #[test]
    fn test_no_centers_at_all_is_no_capable_center() {
        let order = test_order("S", 0.0, 0.0);
        let decision = AssignmentCore::decide(&order, &[]);
        assert_eq!(
            decision,
            Decision::Reject(RejectionReason::NoCapableCenter)
        );
    }

    #[test]
    fn test_unsupported_size_rejected_regardless_of_capacity() {
        let order = test_order("L", 0.0, 0.0);
        let centers = vec![
            test_center("A", vec!["S", "M"], 10, 0, 0.0, 1.0),
            test_center("B", vec!["B"], 10, 0, 0.0, 2.0),
        ];
        assert_eq!(
            AssignmentCore::decide(&order, &centers),
            Decision::Reject(RejectionReason::NoCapableCenter)
        );
    }

    #[test]
    fn test_all_capable_centers_full_is_no_capacity() {
        let order = test_order("S", 0.0, 0.0);
        let centers = vec![
            test_center("A", vec!["S"], 1, 1, 0.0, 1.0),
            test_center("B", vec!["S"], 2, 2, 0.0, 2.0),
            // 有空位但不支持 S, 不参与容量过滤
            test_center("C", vec!["B"], 5, 0, 0.0, 0.1),
        ];
        assert_eq!(
            AssignmentCore::decide(&order, &centers),
            Decision::Reject(RejectionReason::NoCapacityAvailable)
        );
    }

    #[test]
    fn test_nearest_center_wins() {
        // (0,0) 的 S 订单, A 在 (0,1), B 在 (0,2): A 入选, ≈111.19 km
        let order = test_order("S", 0.0, 0.0);
        let centers = vec![
            test_center("B", vec!["S"], 1, 0, 0.0, 2.0),
            test_center("A", vec!["S"], 1, 0, 0.0, 1.0),
        ];
        match AssignmentCore::decide(&order, &centers) {
            Decision::Accept {
                center_index,
                distance_km,
            } => {
                assert_eq!(centers[center_index].name, "A");
                assert!((distance_km - 111.19).abs() < 0.01);
            }
            other => panic!("期望 Accept, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_full_nearest_center_skipped() {
        // 最近的 A 满载 → 选次近的 B
        let order = test_order("M", 0.0, 0.0);
        let centers = vec![
            test_center("A", vec!["M"], 1, 1, 0.0, 1.0),
            test_center("B", vec!["M"], 1, 0, 0.0, 2.0),
        ];
        match AssignmentCore::decide(&order, &centers) {
            Decision::Accept { center_index, .. } => {
                assert_eq!(centers[center_index].name, "B");
            }
            other => panic!("期望 Accept, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_equidistant_tie_first_seen_wins() {
        // 东西各一度,距离相等 → 严格 < 比较保证先遇到的 East 胜出
        let order = test_order("S", 0.0, 0.0);
        let centers = vec![
            test_center("East", vec!["S"], 1, 0, 0.0, 1.0),
            test_center("West", vec!["S"], 1, 0, 0.0, -1.0),
        ];
        match AssignmentCore::decide(&order, &centers) {
            Decision::Accept { center_index, .. } => {
                assert_eq!(center_index, 0);
                assert_eq!(centers[center_index].name, "East");
            }
            other => panic!("期望 Accept, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_decision_does_not_mutate_inputs() {
        let order = test_order("S", 0.0, 0.0);
        let centers = vec![test_center("A", vec!["S"], 1, 0, 0.0, 1.0)];
        let _ = AssignmentCore::decide(&order, &centers);
        assert_eq!(centers[0].current_load, 0);
        assert!(order.is_pending());
    }
}
