// ==========================================
// 物流订单分配系统 - 物流中心数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// 说明: capability 集合以 JSON 数组文本列存储
// ==========================================

use crate::domain::center::Center;
use crate::domain::order::Coordinates;
use crate::domain::types::CenterStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// CenterRepository - 物流中心仓储
// ==========================================

/// 物流中心仓储
/// 职责: 管理 centers 表的 CRUD 操作
pub struct CenterRepository {
    conn: Arc<Mutex<Connection>>,
}

/// 将数据库行映射为中心实体
fn map_center_row(row: &Row<'_>) -> SqliteResult<Center> {
    let capability_json: String = row.get(4)?;
    let capability: Vec<String> = serde_json::from_str(&capability_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, e.into())
    })?;

    let status_str: String = row.get(7)?;
    let status = status_str.parse::<CenterStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, e.into())
    })?;

    Ok(Center {
        id: row.get(0)?,
        name: row.get(1)?,
        coordinates: Coordinates {
            latitude: row.get(2)?,
            longitude: row.get(3)?,
        },
        capability,
        max_capacity: row.get(5)?,
        current_load: row.get(6)?,
        status,
        created_at: row.get::<_, DateTime<Utc>>(8)?,
        updated_at: row.get::<_, DateTime<Utc>>(9)?,
    })
}

const CENTER_COLUMNS: &str = "id, name, latitude, longitude, capability, max_capacity, \
                              current_load, status, created_at, updated_at";

impl CenterRepository {
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

    /// 插入新中心并回填自增 id
    ///
    /// # 返回
    /// - Ok(i64): 新中心 id
    /// - Err(UniqueConstraintViolation): 中心名称重复
    pub fn insert(&self, center: &Center) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let capability_json = serde_json::to_string(&center.capability)?;

        conn.execute(
            r#"
            INSERT INTO centers (
                name, latitude, longitude, capability, max_capacity,
                current_load, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                center.name,
                center.coordinates.latitude,
                center.coordinates.longitude,
                capability_json,
                center.max_capacity,
                center.current_load,
                center.status.to_string(),
                center.created_at,
                center.updated_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// 按 id 查询单个中心
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Center>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {CENTER_COLUMNS} FROM centers WHERE id = ?1"
        ))?;

        let center = stmt.query_row(params![id], map_center_row).optional()?;

        Ok(center)
    }

    /// 查询全部中心 (按 id 升序)
    pub fn find_all(&self) -> RepositoryResult<Vec<Center>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {CENTER_COLUMNS} FROM centers ORDER BY id"
        ))?;

        let centers = stmt
            .query_map([], map_center_row)?
            .collect::<SqliteResult<Vec<Center>>>()?;

        Ok(centers)
    }

    /// 按状态查询中心列表
    ///
    /// 按 id 升序返回: 中心顺序固定,
    /// 保证等距平局时"先遇到者胜出"的归属可复现
    ///
    /// # 参数
    /// - status: 中心状态
    pub fn find_by_status(&self, status: CenterStatus) -> RepositoryResult<Vec<Center>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {CENTER_COLUMNS} FROM centers WHERE status = ?1 ORDER BY id"
        ))?;

        let centers = stmt
            .query_map(params![status.to_string()], map_center_row)?
            .collect::<SqliteResult<Vec<Center>>>()?;

        Ok(centers)
    }

    /// 持久化分配引擎对中心负载的修改
    ///
    /// # 参数
    /// - center: 已被引擎修改的中心实体
    ///
    /// # 返回
    /// - Err(NotFound): 中心不存在
    pub fn update_load(&self, center: &Center) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "UPDATE centers SET current_load = ?1, updated_at = ?2 WHERE id = ?3",
            params![center.current_load, center.updated_at, center.id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Center".to_string(),
                id: center.id.to_string(),
            });
        }

        Ok(())
    }

    /// 更新中心可用状态 (外部维护操作)
    pub fn update_status(&self, id: i64, status: CenterStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "UPDATE centers SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.to_string(), Utc::now(), id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Center".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
