// ==========================================
// 物流订单分配系统 - 批次运行审计仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: assignment_runs 为追加写审计表,不做更新
// ==========================================

use crate::domain::assignment::AssignmentRun;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// AssignmentLogRepository - 运行审计仓储
// ==========================================

/// 批次运行审计仓储
pub struct AssignmentLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssignmentLogRepository {
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

    /// 追加一条批次运行记录
    pub fn insert(&self, run: &AssignmentRun) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO assignment_runs (
                run_id, processed_count, assigned_count, rejected_count, executed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                run.run_id,
                run.processed_count,
                run.assigned_count,
                run.rejected_count,
                run.executed_at,
            ],
        )?;

        Ok(())
    }

    /// 查询最近的批次运行记录 (按执行时间倒序)
    ///
    /// # 参数
    /// - limit: 最多返回条数
    pub fn find_recent(&self, limit: i64) -> RepositoryResult<Vec<AssignmentRun>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT run_id, processed_count, assigned_count, rejected_count, executed_at
            FROM assignment_runs
            ORDER BY executed_at DESC, run_id
            LIMIT ?1
            "#,
        )?;

        let runs = stmt
            .query_map(params![limit], |row| {
                Ok(AssignmentRun {
                    run_id: row.get(0)?,
                    processed_count: row.get(1)?,
                    assigned_count: row.get(2)?,
                    rejected_count: row.get(3)?,
                    executed_at: row.get::<_, DateTime<Utc>>(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<AssignmentRun>>>()?;

        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};

    fn test_repo() -> AssignmentLogRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        AssignmentLogRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_and_find_recent() {
        let repo = test_repo();
        let run = AssignmentRun {
            run_id: uuid::Uuid::new_v4().to_string(),
            processed_count: 10,
            assigned_count: 8,
            rejected_count: 2,
            executed_at: Utc::now(),
        };
        repo.insert(&run).unwrap();

        let recent = repo.find_recent(5).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].run_id, run.run_id);
        assert_eq!(recent[0].processed_count, 10);
        assert_eq!(recent[0].assigned_count, 8);
        assert_eq!(recent[0].rejected_count, 2);
    }
}
