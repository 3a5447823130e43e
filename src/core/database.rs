// src/core/database.rs
//! Record store: SQLite connection management and the job/application repository

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::core::JobId;
use crate::types::{Application, ApplicationFields, Job, JobFields, SearchQuery};

// ===== Core Database Connection Management =====

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for `database_url` and run migrations
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = if database_url.contains(":memory:") {
            // every connection to an in-memory database sees its own copy,
            // so the pool must keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;

        info!("Database connection established: {}", database_url);

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                location TEXT NOT NULL,
                description TEXT NOT NULL,
                salary REAL NOT NULL CHECK (salary > 0),
                company_email TEXT NOT NULL,
                company_name TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create jobs table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS applications (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                job_id TEXT NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                education TEXT NOT NULL,
                phone TEXT NOT NULL,
                email TEXT NOT NULL,
                submitted_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create applications table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_applications_job_id ON applications(job_id);")
            .execute(&self.pool)
            .await?;

        info!("Database migrations completed");
        Ok(())
    }

    pub fn record_store(&self) -> SqliteRecordStore {
        SqliteRecordStore::new(self.pool.clone())
    }
}

// ===== Record Store =====

/// Data-access seam between the services and persistence.
///
/// Identifiers are checked by callers before any method is invoked.
#[rocket::async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_job(&self, fields: &JobFields) -> Result<Job>;

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>>;

    /// Replace all six fields in one write; `None` when no record has `id`
    async fn find_by_id_and_replace(&self, id: &JobId, fields: &JobFields) -> Result<Option<Job>>;

    /// All jobs, oldest first
    async fn find_all(&self) -> Result<Vec<Job>>;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Job>>;

    async fn insert_application(
        &self,
        job_id: &JobId,
        fields: &ApplicationFields,
    ) -> Result<Application>;

    /// Bulk teardown of jobs and their applications; returns jobs removed
    async fn delete_all(&self) -> Result<u64>;

    async fn ping(&self) -> Result<()>;
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: String,
    name: String,
    location: String,
    description: String,
    salary: f64,
    company_email: String,
    company_name: String,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            fields: JobFields {
                name: row.name,
                location: row.location,
                description: row.description,
                salary: row.salary,
                company_email: row.company_email,
                company_name: row.company_name,
            },
        }
    }
}

const JOB_COLUMNS: &str = "id, name, location, description, salary, company_email, company_name";

#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[rocket::async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert_job(&self, fields: &JobFields) -> Result<Job> {
        let id = JobId::generate();

        sqlx::query(
            r#"
            INSERT INTO jobs (id, name, location, description, salary, company_email, company_name)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.as_str())
        .bind(&fields.name)
        .bind(&fields.location)
        .bind(&fields.description)
        .bind(fields.salary)
        .bind(&fields.company_email)
        .bind(&fields.company_name)
        .execute(&self.pool)
        .await
        .context("Failed to insert job")?;

        info!("Created job {} ({})", id, fields.name);
        Ok(Job {
            id: id.to_string(),
            fields: fields.clone(),
        })
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs WHERE id = ?",
            JOB_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Job::from))
    }

    async fn find_by_id_and_replace(&self, id: &JobId, fields: &JobFields) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET name = ?, location = ?, description = ?, salary = ?,
                company_email = ?, company_name = ?, updated_at = datetime('now')
            WHERE id = ?
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&fields.name)
        .bind(&fields.location)
        .bind(&fields.description)
        .bind(fields.salary)
        .bind(&fields.company_email)
        .bind(&fields.company_name)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Job::from))
    }

    async fn find_all(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs ORDER BY seq ASC",
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Job>> {
        let keyword = query.keyword.as_deref().map(like_pattern);
        let classification = query.classification.as_deref().map(like_pattern);

        let rows = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {}
            FROM jobs
            WHERE (? IS NULL
                   OR name LIKE ? ESCAPE '\'
                   OR description LIKE ? ESCAPE '\'
                   OR location LIKE ? ESCAPE '\'
                   OR company_name LIKE ? ESCAPE '\')
              AND (? IS NULL OR name LIKE ? ESCAPE '\')
            ORDER BY seq ASC
            "#,
            JOB_COLUMNS
        ))
        .bind(&keyword)
        .bind(&keyword)
        .bind(&keyword)
        .bind(&keyword)
        .bind(&keyword)
        .bind(&classification)
        .bind(&classification)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn insert_application(
        &self,
        job_id: &JobId,
        fields: &ApplicationFields,
    ) -> Result<Application> {
        let id = JobId::generate();
        let submitted_at: DateTime<Utc> = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO applications (id, job_id, name, age, education, phone, email, submitted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.as_str())
        .bind(job_id.as_str())
        .bind(&fields.name)
        .bind(i64::from(fields.age))
        .bind(&fields.education)
        .bind(&fields.phone)
        .bind(&fields.email)
        .bind(submitted_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert application")?;

        info!("Recorded application {} for job {}", id, job_id);
        Ok(Application {
            id: id.to_string(),
            job_id: job_id.to_string(),
            fields: fields.clone(),
            submitted_at,
        })
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM applications")
            .execute(&mut *tx)
            .await?;
        let removed = sqlx::query("DELETE FROM jobs")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        info!("Removed {} jobs and their applications", removed);
        Ok(removed)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Record store ping failed")?;
        Ok(())
    }
}

/// Substring pattern for `LIKE ... ESCAPE '\'`
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, salary: f64) -> JobFields {
        JobFields {
            name: name.to_string(),
            location: "Singapore".to_string(),
            description: "Build and run services".to_string(),
            salary,
            company_email: "hr@example.com".to_string(),
            company_name: "Example Pte Ltd".to_string(),
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }

    #[tokio::test]
    async fn test_insert_find_and_replace() {
        let db = Database::in_memory().await.unwrap();
        let store = db.record_store();

        let job = store.insert_job(&fields("Backend Engineer", 5000.0)).await.unwrap();
        let id: JobId = job.id.parse().unwrap();

        assert_eq!(store.find_by_id(&id).await.unwrap(), Some(job.clone()));

        let replaced = store
            .find_by_id_and_replace(&id, &fields("Platform Engineer", 6000.0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.id, job.id);
        assert_eq!(replaced.fields.name, "Platform Engineer");
        assert_eq!(replaced.fields.salary, 6000.0);

        let reread = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(reread, replaced);
    }

    #[tokio::test]
    async fn test_replace_missing_record_returns_none() {
        let db = Database::in_memory().await.unwrap();
        let store = db.record_store();

        let missing = JobId::generate();
        assert!(store
            .find_by_id_and_replace(&missing, &fields("Ghost", 1.0))
            .await
            .unwrap()
            .is_none());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_keyword_and_classification() {
        let db = Database::in_memory().await.unwrap();
        let store = db.record_store();

        store.insert_job(&fields("Backend Engineer", 5000.0)).await.unwrap();
        store.insert_job(&fields("Data Analyst", 4000.0)).await.unwrap();

        let all = store.search(&SearchQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let engineers = store
            .search(&SearchQuery::new(Some("engineer".to_string()), None))
            .await
            .unwrap();
        assert_eq!(engineers.len(), 1);
        assert_eq!(engineers[0].fields.name, "Backend Engineer");

        let by_company = store
            .search(&SearchQuery::new(Some("example pte".to_string()), None))
            .await
            .unwrap();
        assert_eq!(by_company.len(), 2);

        let none = store
            .search(&SearchQuery::new(
                Some("singapore".to_string()),
                Some("designer".to_string()),
            ))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_applications_and_teardown() {
        let db = Database::in_memory().await.unwrap();
        let store = db.record_store();

        let job = store.insert_job(&fields("Backend Engineer", 5000.0)).await.unwrap();
        let id: JobId = job.id.parse().unwrap();

        let application = store
            .insert_application(
                &id,
                &ApplicationFields {
                    name: "Jane".to_string(),
                    age: 29,
                    education: "BSc".to_string(),
                    phone: "91234567".to_string(),
                    email: "jane@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(application.job_id, job.id);

        assert_eq!(store.delete_all().await.unwrap(), 1);
        assert!(store.find_all().await.unwrap().is_empty());
        store.ping().await.unwrap();
    }
}
