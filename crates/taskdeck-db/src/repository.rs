use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{
    models::{NewTodo, TodoRecord},
    Error, Result,
};

#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Create new database connection
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                details TEXT NOT NULL,
                date TIMESTAMPTZ,
                is_done BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_is_done ON todos(is_done)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All todos in id (insertion) order.
    pub async fn list_todos(&self) -> Result<Vec<TodoRecord>> {
        let records = sqlx::query_as::<_, TodoRecord>("SELECT * FROM todos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Get todo by id
    pub async fn get_todo(&self, id: i64) -> Result<Option<TodoRecord>> {
        let record = sqlx::query_as::<_, TodoRecord>("SELECT * FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Insert a todo; the database assigns the id.
    pub async fn insert_todo(&self, todo: &NewTodo) -> Result<TodoRecord> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            INSERT INTO todos (title, details, date, is_done)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.details)
        .bind(todo.date)
        .bind(todo.is_done)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Full-row replace of the mutable columns.
    pub async fn update_todo(&self, id: i64, todo: &NewTodo) -> Result<()> {
        let result = sqlx::query(
            "UPDATE todos SET title = $1, details = $2, date = $3, is_done = $4 WHERE id = $5",
        )
        .bind(&todo.title)
        .bind(&todo.details)
        .bind(todo.date)
        .bind(todo.is_done)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::TodoNotFound(id));
        }

        Ok(())
    }

    /// Flip the done flag and return the updated row.
    pub async fn toggle_todo(&self, id: i64) -> Result<TodoRecord> {
        let record = sqlx::query_as::<_, TodoRecord>(
            "UPDATE todos SET is_done = NOT is_done WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.ok_or(Error::TodoNotFound(id))
    }

    /// Hard delete, no tombstone.
    pub async fn delete_todo(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::TodoNotFound(id));
        }

        Ok(())
    }
}
