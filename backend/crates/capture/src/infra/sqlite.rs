//! SQLite Repository Implementations

use kernel::id::CaptureId;
use sqlx::SqlitePool;

use crate::domain::entities::{CaptureView, OrderSummary, PackCapture};
use crate::domain::repository::CaptureRepository;
use crate::domain::value_objects::OrderNo;
use crate::error::{CaptureError, CaptureResult};

/// SQLite-backed capture repository
#[derive(Clone)]
pub struct SqliteCaptureRepository {
    pool: SqlitePool,
}

impl SqliteCaptureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

const SELECT_VIEW: &str = r#"
    SELECT
        c.id,
        c.order_no,
        c.photo_path,
        c.captured_at_ms,
        o.name AS operator_name,
        c.station,
        c.note,
        c.responsible,
        c.checksum,
        c.voided,
        c.void_reason
    FROM pack_captures c
    LEFT JOIN operators o ON o.id = c.operator_id
"#;

impl CaptureRepository for SqliteCaptureRepository {
    async fn create(&self, capture: &PackCapture) -> CaptureResult<CaptureView> {
        // Unknown operators are stored as NULL rather than failing the FK
        sqlx::query(
            r#"
            INSERT INTO pack_captures (
                id,
                order_no,
                photo_path,
                captured_at_ms,
                operator_id,
                station,
                note,
                responsible,
                checksum,
                voided,
                void_reason
            ) VALUES (
                ?, ?, ?, ?,
                (SELECT id FROM operators WHERE id = ?),
                ?, ?, ?, ?, ?, ?
            )
            "#,
        )
        .bind(capture.id.to_string())
        .bind(capture.order_no.as_str())
        .bind(&capture.photo_path)
        .bind(capture.captured_at_ms)
        .bind(capture.operator_id.as_deref())
        .bind(capture.station.as_deref())
        .bind(&capture.note)
        .bind(&capture.responsible)
        .bind(&capture.checksum)
        .bind(capture.voided)
        .bind(capture.void_reason.as_deref())
        .execute(&self.pool)
        .await?;

        self.find_by_id(&capture.id)
            .await?
            .ok_or_else(|| CaptureError::Internal("Inserted capture not found".to_string()))
    }

    async fn find_by_order(&self, order_no: &OrderNo) -> CaptureResult<Vec<CaptureView>> {
        let sql = format!(
            "{SELECT_VIEW} WHERE c.order_no = ? ORDER BY c.captured_at_ms DESC, c.rowid DESC"
        );

        let rows = sqlx::query_as::<_, CaptureRow>(&sql)
            .bind(order_no.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CaptureRow::into_view).collect()
    }

    async fn summarize_orders(&self) -> CaptureResult<Vec<OrderSummary>> {
        let rows = sqlx::query_as::<_, OrderSummaryRow>(
            r#"
            SELECT
                order_no,
                MAX(captured_at_ms) AS last_capture_at_ms,
                COUNT(*) AS capture_count
            FROM pack_captures
            GROUP BY order_no
            ORDER BY last_capture_at_ms DESC, MAX(rowid) DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| OrderSummary {
                order_no: r.order_no,
                last_capture_at_ms: r.last_capture_at_ms,
                count: r.capture_count,
            })
            .collect())
    }

    async fn find_by_id(&self, id: &CaptureId) -> CaptureResult<Option<CaptureView>> {
        let sql = format!("{SELECT_VIEW} WHERE c.id = ?");

        let row = sqlx::query_as::<_, CaptureRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(CaptureRow::into_view).transpose()
    }

    async fn mark_voided(&self, id: &CaptureId, reason: &str) -> CaptureResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE pack_captures
            SET voided = 1, void_reason = ?
            WHERE id = ? AND voided = 0
            "#,
        )
        .bind(reason)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CaptureRow {
    id: String,
    order_no: String,
    photo_path: String,
    captured_at_ms: i64,
    operator_name: Option<String>,
    station: Option<String>,
    note: String,
    responsible: String,
    checksum: String,
    voided: bool,
    void_reason: Option<String>,
}

impl CaptureRow {
    fn into_view(self) -> CaptureResult<CaptureView> {
        let id = self
            .id
            .parse::<CaptureId>()
            .map_err(|_| CaptureError::Internal(format!("Malformed capture id: {}", self.id)))?;

        Ok(CaptureView {
            id,
            order_no: self.order_no,
            photo_path: self.photo_path,
            captured_at_ms: self.captured_at_ms,
            operator_name: self.operator_name,
            station: self.station,
            note: self.note,
            responsible: self.responsible,
            checksum: self.checksum,
            voided: self.voided,
            void_reason: self.void_reason,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderSummaryRow {
    order_no: String,
    last_capture_at_ms: i64,
    capture_count: i64,
}
