use std::collections::HashMap;

use async_trait::async_trait;
use bigdecimal::ToPrimitive;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::db::indicator_queries::{self, IndicatorRow, IndicatorValueRow};
use crate::models::{DataPoint, IndicatorSeries};
use crate::store::{SeriesStore, StoreError};

/// `SeriesStore` over the `economic_indicators` / `indicator_values` tables.
#[derive(Clone)]
pub struct PgSeriesStore {
    pool: PgPool,
}

impl PgSeriesStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assemble(
        &self,
        rows: Vec<IndicatorRow>,
        with_related: bool,
    ) -> Result<Vec<IndicatorSeries>, StoreError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let values = indicator_queries::fetch_values(&self.pool, &ids).await?;
        let mut grouped = group_values(values)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let related_candidates = if with_related {
                indicator_queries::fetch_names_in_category(&self.pool, &row.category, row.id).await?
            } else {
                Vec::new()
            };

            out.push(IndicatorSeries {
                id: row.id,
                data: grouped.remove(&row.id).unwrap_or_default(),
                name: row.name,
                category: row.category,
                source: row.source,
                related_candidates,
            });
        }
        Ok(out)
    }
}

/// Convert NUMERIC rows to points, keeping the query's newest-first order.
fn group_values(
    rows: Vec<IndicatorValueRow>,
) -> Result<HashMap<Uuid, Vec<DataPoint>>, StoreError> {
    let mut grouped: HashMap<Uuid, Vec<DataPoint>> = HashMap::new();
    for row in rows {
        let value = row.value.to_f64().ok_or_else(|| {
            StoreError::Malformed(format!(
                "value {} on {} for indicator {} is not representable as f64",
                row.value, row.date, row.indicator_id
            ))
        })?;
        grouped
            .entry(row.indicator_id)
            .or_default()
            .push(DataPoint::new(row.date, value));
    }
    Ok(grouped)
}

#[async_trait]
impl SeriesStore for PgSeriesStore {
    async fn get_indicator_by_name(
        &self,
        name: &str,
    ) -> Result<Option<IndicatorSeries>, StoreError> {
        let Some(row) = indicator_queries::fetch_by_name(&self.pool, name).await? else {
            debug!("Indicator '{}' not found", name);
            return Ok(None);
        };

        Ok(self.assemble(vec![row], true).await?.into_iter().next())
    }

    async fn list_indicators_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<IndicatorSeries>, StoreError> {
        let rows = indicator_queries::fetch_by_names(&self.pool, names).await?;
        self.assemble(rows, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn row(id: Uuid, date: &str, value: &str) -> IndicatorValueRow {
        IndicatorValueRow {
            indicator_id: id,
            date: NaiveDate::from_str(date).unwrap(),
            value: BigDecimal::from_str(value).unwrap(),
        }
    }

    #[test]
    fn test_group_values_keeps_order_per_indicator() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let grouped = group_values(vec![
            row(a, "2024-03-01", "3.9"),
            row(a, "2024-02-01", "3.8"),
            row(b, "2024-03-01", "310.2"),
        ])
        .unwrap();

        let a_values: Vec<f64> = grouped[&a].iter().map(|p| p.value).collect();
        assert_eq!(a_values, vec![3.9, 3.8]);
        assert_eq!(grouped[&b].len(), 1);
    }
}
