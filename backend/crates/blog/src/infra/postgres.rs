//! PostgreSQL Blog Repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Blog, NewBlog};
use crate::domain::repository::BlogRepository;
use crate::domain::value_objects::{BlogContent, BlogId, BlogTitle, UserId};
use crate::error::{BlogError, BlogResult};

#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BlogRepository for PgBlogRepository {
    async fn create(&self, blog: &NewBlog) -> BlogResult<Blog> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (author_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING blog_id, author_id, title, content, created_at, updated_at, deleted_at
            "#,
        )
        .bind(blog.author_id.value())
        .bind(blog.title.as_str())
        .bind(blog.content.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, blog_id: &BlogId) -> BlogResult<Blog> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT blog_id, author_id, title, content, created_at, updated_at, deleted_at
            FROM blogs
            WHERE blog_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(blog_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Blog::from).ok_or(BlogError::BlogNotFound)
    }

    async fn find_by_author(&self, author_id: &UserId) -> BlogResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT blog_id, author_id, title, content, created_at, updated_at, deleted_at
            FROM blogs
            WHERE author_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, blog_id DESC
            "#,
        )
        .bind(author_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn update(&self, blog: &Blog) -> BlogResult<Blog> {
        let mut tx = self.pool.begin().await?;

        // Serialises concurrent edits of the same post; the later commit wins.
        let locked: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT blog_id FROM blogs
            WHERE blog_id = $1 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(blog.blog_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Err(BlogError::BlogNotFound);
        }

        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET title = $2, content = $3, updated_at = now()
            WHERE blog_id = $1
            RETURNING blog_id, author_id, title, content, created_at, updated_at, deleted_at
            "#,
        )
        .bind(blog.blog_id.value())
        .bind(blog.title.as_str())
        .bind(blog.content.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, blog_id: &BlogId) -> BlogResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET deleted_at = now(), updated_at = now()
            WHERE blog_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(blog_id.value())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BlogError::BlogNotFound);
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct BlogRow {
    blog_id: i64,
    author_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        Self {
            blog_id: BlogId::new(row.blog_id),
            author_id: UserId::new(row.author_id),
            title: BlogTitle::from_db(row.title),
            content: BlogContent::from_db(row.content),
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}
