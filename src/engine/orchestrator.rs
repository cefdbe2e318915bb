// ==========================================
// 物流订单分配系统 - 分配流程编排器
// ==========================================
// 用途: 协调"取样 → 引擎 → 落库 → 审计"的执行顺序
// 红线: 同一时刻只允许一个批次运行 (全局批次锁),
//       并发批次会超卖中心容量
// ==========================================

use crate::domain::assignment::{AssignmentOutcome, AssignmentRun};
use crate::domain::types::{CenterStatus, OrderStatus};
use crate::engine::assignment::AssignmentEngine;
use crate::repository::{
    AssignmentLogRepository, CenterRepository, OrderRepository, RepositoryResult,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// AssignmentBatchResult - 批次执行结果
// ==========================================

#[derive(Debug, Clone)]
pub struct AssignmentBatchResult {
    pub run_id: String,                   // 本次运行标识
    pub outcomes: Vec<AssignmentOutcome>, // 与 PENDING 订单同序的结果记录
}

impl AssignmentBatchResult {
    pub fn assigned_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_assigned()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.assigned_count()
    }
}

// ==========================================
// AssignmentOrchestrator - 分配流程编排器
// ==========================================

pub struct AssignmentOrchestrator {
    order_repo: Arc<OrderRepository>,
    center_repo: Arc<CenterRepository>,
    log_repo: Arc<AssignmentLogRepository>,
    engine: AssignmentEngine,
    // 全局批次临界区: 串行化整批运行,
    // 仅靠连接级互斥不能阻止"取样-提交"序列交错
    batch_lock: Mutex<()>,
}

impl AssignmentOrchestrator {
    /// 创建新的编排器实例
    pub fn new(
        order_repo: Arc<OrderRepository>,
        center_repo: Arc<CenterRepository>,
        log_repo: Arc<AssignmentLogRepository>,
    ) -> Self {
        Self {
            order_repo,
            center_repo,
            log_repo,
            engine: AssignmentEngine::new(),
            batch_lock: Mutex::new(()),
        }
    }

    /// 执行一次完整的批次分配
    ///
    /// 流程:
    /// 1. PENDING 订单 + AVAILABLE 中心各取样一次 (运行中不重查)
    /// 2. 引擎按输入顺序逐单决策并就地修改
    /// 3. 仅对发生修改的实体调用落库
    /// 4. 写入一条运行审计记录
    ///
    /// # 返回
    /// 批次执行结果 (运行标识 + 与输入同序的结果记录)
    pub async fn run_assignment(&self) -> RepositoryResult<AssignmentBatchResult> {
        let _guard = self.batch_lock.lock().await;

        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, "开始执行批次分配");

        // ==========================================
        // 步骤1: 取样 PENDING 订单与 AVAILABLE 中心
        // ==========================================
        let mut orders = self.order_repo.find_by_status(OrderStatus::Pending)?;
        let mut centers = self.center_repo.find_by_status(CenterStatus::Available)?;

        debug!(
            pending_orders = orders.len(),
            available_centers = centers.len(),
            "取样完成"
        );

        // ==========================================
        // 步骤2: 引擎批次决策
        // ==========================================
        let outcomes = self.engine.run_batch(&mut orders, &mut centers);

        // ==========================================
        // 步骤3: 落库 (仅修改过的实体)
        // ==========================================
        let mut persisted_orders = 0usize;
        for order in orders.iter().filter(|o| !o.is_pending()) {
            self.order_repo.update_assignment(order)?;
            persisted_orders += 1;
        }

        let mut persisted_centers = 0usize;
        for center in centers.iter().filter(|c| c.current_load > 0) {
            // current_load 可能在取样时就非零; 以结果记录判定是否真的被修改
            let touched = outcomes
                .iter()
                .any(|o| o.assigned_center.as_deref() == Some(center.name.as_str()));
            if touched {
                self.center_repo.update_load(center)?;
                persisted_centers += 1;
            }
        }

        // ==========================================
        // 步骤4: 运行审计记录
        // ==========================================
        let assigned_count = outcomes.iter().filter(|o| o.is_assigned()).count() as i64;
        let run = AssignmentRun {
            run_id: run_id.clone(),
            processed_count: outcomes.len() as i64,
            assigned_count,
            rejected_count: outcomes.len() as i64 - assigned_count,
            executed_at: Utc::now(),
        };
        self.log_repo.insert(&run)?;

        info!(
            run_id = %run_id,
            processed = outcomes.len(),
            assigned = assigned_count,
            persisted_orders,
            persisted_centers,
            "批次分配完成"
        );

        Ok(AssignmentBatchResult { run_id, outcomes })
    }
}
