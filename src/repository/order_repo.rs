// ==========================================
// 物流订单分配系统 - 订单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::domain::order::{Coordinates, Order};
use crate::domain::types::OrderStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderRepository - 订单仓储
// ==========================================

/// 订单仓储
/// 职责: 管理 orders 表的 CRUD 操作
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

/// 将数据库行映射为订单实体
fn map_order_row(row: &Row<'_>) -> SqliteResult<Order> {
    let status_str: String = row.get(5)?;
    let status = status_str.parse::<OrderStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, e.into())
    })?;

    Ok(Order {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        size: row.get(2)?,
        coordinates: Coordinates {
            latitude: row.get(3)?,
            longitude: row.get(4)?,
        },
        status,
        assigned_center: row.get(6)?,
        created_at: row.get::<_, DateTime<Utc>>(7)?,
        updated_at: row.get::<_, DateTime<Utc>>(8)?,
    })
}

const ORDER_COLUMNS: &str =
    "id, customer_id, size, latitude, longitude, status, assigned_center, created_at, updated_at";

impl OrderRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入新订单并回填自增 id
    ///
    /// # 参数
    /// - order: 订单实体 (id 字段被忽略)
    ///
    /// # 返回
    /// - Ok(i64): 新订单 id
    pub fn insert(&self, order: &Order) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO orders (
                customer_id, size, latitude, longitude,
                status, assigned_center, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                order.customer_id,
                order.size,
                order.coordinates.latitude,
                order.coordinates.longitude,
                order.status.to_string(),
                order.assigned_center,
                order.created_at,
                order.updated_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// 按 id 查询单个订单
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))?;

        let order = stmt.query_row(params![id], map_order_row).optional()?;

        Ok(order)
    }

    /// 查询全部订单 (按 id 升序)
    pub fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"
        ))?;

        let orders = stmt
            .query_map([], map_order_row)?
            .collect::<SqliteResult<Vec<Order>>>()?;

        Ok(orders)
    }

    /// 按状态查询订单列表
    ///
    /// 按 id 升序返回: 分配引擎的输入顺序即此顺序,
    /// 保证批次处理顺序稳定可复现
    ///
    /// # 参数
    /// - status: 订单状态
    ///
    /// # 返回
    /// - Ok(Vec<Order>): 订单列表
    pub fn find_by_status(&self, status: OrderStatus) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE status = ?1 ORDER BY id"
        ))?;

        let orders = stmt
            .query_map(params![status.to_string()], map_order_row)?
            .collect::<SqliteResult<Vec<Order>>>()?;

        Ok(orders)
    }

    /// 持久化分配引擎对订单的修改 (状态 + 分配中心)
    ///
    /// # 参数
    /// - order: 已被引擎修改的订单实体
    ///
    /// # 返回
    /// - Err(NotFound): 订单不存在
    pub fn update_assignment(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE orders
            SET status = ?1, assigned_center = ?2, updated_at = ?3
            WHERE id = ?4
            "#,
            params![
                order.status.to_string(),
                order.assigned_center,
                order.updated_at,
                order.id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Order".to_string(),
                id: order.id.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};

    fn test_repo() -> OrderRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        OrderRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn sample_order(customer_id: i64, size: &str) -> Order {
        Order::new_pending(customer_id, size.to_string(), Coordinates::new(40.0, -3.7))
    }

    #[test]
    fn test_insert_and_find_by_id() {
        let repo = test_repo();
        let id = repo.insert(&sample_order(7, "M")).unwrap();
        assert!(id > 0);

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.customer_id, 7);
        assert_eq!(found.size, "M");
        assert_eq!(found.status, OrderStatus::Pending);
        assert!(found.assigned_center.is_none());
    }

    #[test]
    fn test_find_by_status_ordered_by_id() {
        let repo = test_repo();
        let id1 = repo.insert(&sample_order(1, "S")).unwrap();
        let id2 = repo.insert(&sample_order(2, "M")).unwrap();
        let id3 = repo.insert(&sample_order(3, "B")).unwrap();

        let pending = repo.find_by_status(OrderStatus::Pending).unwrap();
        let ids: Vec<i64> = pending.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![id1, id2, id3]);

        assert!(repo.find_by_status(OrderStatus::Assigned).unwrap().is_empty());
    }

    #[test]
    fn test_update_assignment_persists_transition() {
        let repo = test_repo();
        let id = repo.insert(&sample_order(5, "S")).unwrap();

        let mut order = repo.find_by_id(id).unwrap().unwrap();
        order.assign_to("Centro Sur");
        repo.update_assignment(&order).unwrap();

        let reloaded = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(reloaded.status, OrderStatus::Assigned);
        assert_eq!(reloaded.assigned_center.as_deref(), Some("Centro Sur"));

        let pending = repo.find_by_status(OrderStatus::Pending).unwrap();
        assert!(pending.is_empty());
    }

    #[test]
    fn test_update_assignment_missing_order_is_not_found() {
        let repo = test_repo();
        let mut order = sample_order(1, "S");
        order.id = 999;
        let err = repo.update_assignment(&order).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
