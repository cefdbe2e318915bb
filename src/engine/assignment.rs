// ==========================================
// 物流订单分配系统 - 批次分配引擎
// ==========================================
// 职责: 对一批 PENDING 订单在中心快照上顺序执行分配
// 输入: PENDING 订单列表 + AVAILABLE 中心快照 (单次取样)
// 输出: 与输入同序的结果记录 + 就地更新被分配的订单/中心
// 红线: 前序订单消耗的容量对后序订单可见 (同批次内)
// ==========================================

use crate::domain::assignment::AssignmentOutcome;
use crate::domain::center::Center;
use crate::domain::order::Order;
use crate::engine::assignment_core::{AssignmentCore, Decision};
use tracing::{debug, instrument};

// ==========================================
// AssignmentEngine - 批次分配引擎
// ==========================================
pub struct AssignmentEngine {
    // 无状态引擎,不需要注入依赖
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行一次批次分配
    ///
    /// 按输入顺序逐单处理: 资格过滤 → 容量过滤 → 最近中心选择 → 提交。
    /// 提交阶段就地修改: 中心负载 +1, 订单置 ASSIGNED 并记录中心名称。
    /// 被拒绝的订单保持 PENDING, 对应实体不做任何修改。
    ///
    /// # 参数
    /// - orders: PENDING 订单批次 (会被修改)
    /// - centers: AVAILABLE 中心快照 (会被修改)
    ///
    /// # 返回
    /// 与 orders 同序的结果记录列表, 每单一条
    #[instrument(skip(self, orders, centers), fields(
        orders_count = orders.len(),
        centers_count = centers.len()
    ))]
    pub fn run_batch(
        &self,
        orders: &mut [Order],
        centers: &mut [Center],
    ) -> Vec<AssignmentOutcome> {
        let mut outcomes = Vec::with_capacity(orders.len());

        for order in orders.iter_mut() {
            match AssignmentCore::decide(order, centers) {
                Decision::Accept {
                    center_index,
                    distance_km,
                } => {
                    let center = &mut centers[center_index];
                    center.increment_load();
                    order.assign_to(&center.name);

                    debug!(
                        order_id = order.id,
                        center = %center.name,
                        distance_km,
                        current_load = center.current_load,
                        "订单分配成功"
                    );

                    outcomes.push(AssignmentOutcome::assigned(
                        order.id,
                        &center.name,
                        distance_km,
                    ));
                }
                Decision::Reject(reason) => {
                    debug!(order_id = order.id, reason = ?reason, "订单被拒绝");
                    outcomes.push(AssignmentOutcome::rejected(order.id, reason));
                }
            }
        }

        outcomes
    }
}
