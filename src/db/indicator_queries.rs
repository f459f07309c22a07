use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct IndicatorRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub source: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct IndicatorValueRow {
    pub indicator_id: Uuid,
    pub date: NaiveDate,
    pub value: BigDecimal,
}

pub async fn fetch_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<IndicatorRow>, sqlx::Error> {
    sqlx::query_as::<_, IndicatorRow>(
        r#"
        SELECT id, name, category, source
        FROM economic_indicators
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_names(
    pool: &PgPool,
    names: &[String],
) -> Result<Vec<IndicatorRow>, sqlx::Error> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, IndicatorRow>(
        r#"
        SELECT id, name, category, source
        FROM economic_indicators
        WHERE name = ANY($1)
        "#,
    )
    .bind(names)
    .fetch_all(pool)
    .await
}

/// Values for a set of indicators, grouped by indicator and newest first.
pub async fn fetch_values(
    pool: &PgPool,
    indicator_ids: &[Uuid],
) -> Result<Vec<IndicatorValueRow>, sqlx::Error> {
    if indicator_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, IndicatorValueRow>(
        r#"
        SELECT indicator_id, date, value
        FROM indicator_values
        WHERE indicator_id = ANY($1)
        ORDER BY indicator_id, date DESC
        "#,
    )
    .bind(indicator_ids)
    .fetch_all(pool)
    .await
}

/// Names of the other indicators filed under the same category.
pub async fn fetch_names_in_category(
    pool: &PgPool,
    category: &str,
    exclude_id: Uuid,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT name
        FROM economic_indicators
        WHERE category = $1 AND id <> $2
        ORDER BY name
        "#,
    )
    .bind(category)
    .bind(exclude_id)
    .fetch_all(pool)
    .await
}
