use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgConnection, PgPool};
use time::OffsetDateTime;

use super::{CustomerGroupStore, StoreError};
use crate::customer_groups::model::{AddMembersOutcome, CustomerGroup};

pub struct PgCustomerGroupStore {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct GroupRow {
    id: String,
    name: String,
    metadata: Option<Value>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl PgCustomerGroupStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

async fn fetch_group_row(
    conn: &mut PgConnection,
    group_id: &str,
    lock_row: bool,
) -> Result<Option<GroupRow>, sqlx::Error> {
    let sql = if lock_row {
        r#"
        SELECT id, name, metadata, created_at, updated_at
        FROM customer_groups
        WHERE id = $1
        FOR NO KEY UPDATE
        "#
    } else {
        r#"
        SELECT id, name, metadata, created_at, updated_at
        FROM customer_groups
        WHERE id = $1
        "#
    };

    sqlx::query_as::<_, GroupRow>(sql)
        .bind(group_id)
        .fetch_optional(conn)
        .await
}

async fn fetch_member_ids(
    conn: &mut PgConnection,
    group_id: &str,
) -> Result<BTreeSet<String>, sqlx::Error> {
    let ids: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT customer_id
        FROM customer_group_customers
        WHERE customer_group_id = $1
        ORDER BY customer_id
        "#,
    )
    .bind(group_id)
    .fetch_all(conn)
    .await?;

    Ok(ids.into_iter().collect())
}

fn into_group(row: GroupRow, customer_ids: BTreeSet<String>) -> CustomerGroup {
    CustomerGroup {
        id: row.id,
        name: row.name,
        metadata: row.metadata,
        customer_ids,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl CustomerGroupStore for PgCustomerGroupStore {
    async fn find_group(&self, group_id: &str) -> Result<Option<CustomerGroup>, StoreError> {
        let mut conn = self.db.acquire().await?;

        let Some(row) = fetch_group_row(&mut conn, group_id, false).await? else {
            return Ok(None);
        };
        let members = fetch_member_ids(&mut conn, group_id).await?;

        Ok(Some(into_group(row, members)))
    }

    async fn add_members(
        &self,
        group_id: &str,
        customer_ids: &[String],
    ) -> Result<Option<AddMembersOutcome>, StoreError> {
        // Dropping `tx` before commit rolls everything back.
        let mut tx = self.db.begin().await?;

        let Some(mut row) = fetch_group_row(&mut tx, group_id, true).await? else {
            return Ok(None);
        };

        let mut candidates = customer_ids.to_vec();
        candidates.sort();
        candidates.dedup();

        let known: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM customers
            WHERE id = ANY($1)
            ORDER BY id
            FOR SHARE
            "#,
        )
        .bind(&candidates)
        .fetch_all(&mut *tx)
        .await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO customer_group_customers (customer_group_id, customer_id)
            SELECT $1, src.customer_id
            FROM UNNEST($2::text[]) AS src(customer_id)
            ORDER BY src.customer_id
            ON CONFLICT (customer_group_id, customer_id) DO NOTHING
            "#,
        )
        .bind(group_id)
        .bind(&known)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted > 0 {
            row = sqlx::query_as::<_, GroupRow>(
                r#"
                UPDATE customer_groups
                SET updated_at = now()
                WHERE id = $1
                RETURNING id, name, metadata, created_at, updated_at
                "#,
            )
            .bind(group_id)
            .fetch_one(&mut *tx)
            .await?;
        }

        let members = fetch_member_ids(&mut tx, group_id).await?;
        tx.commit().await?;

        Ok(Some(AddMembersOutcome {
            group: into_group(row, members),
            added: inserted as usize,
            unknown: candidates.len() - known.len(),
        }))
    }
}
