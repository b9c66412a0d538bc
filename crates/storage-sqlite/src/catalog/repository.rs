//! Generic upsert repository over the five category tables.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Nullable, Text};
use diesel::SqliteConnection;
use log::error;

use gibi_core::catalog::{
    CatalogItem, CatalogRecord, CatalogRepositoryTrait, Category, TranslatedText,
};
use gibi_core::Result;

use crate::db::{get_connection, to_db_timestamp, DbPool, WriteHandle};
use crate::errors::StorageError;

use super::model::{CatalogRowDB, TranslatedRow};

fn quote_identifier(value: &str) -> String {
    format!("`{}`", value.replace('`', "``"))
}

pub struct CatalogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CatalogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CatalogRepository { pool, writer }
    }

    fn load_translated_impl(&self, category: Category) -> Result<HashMap<i64, TranslatedText>> {
        let mut conn = get_connection(&self.pool)?;
        let sql = format!(
            "SELECT upstream_id, title_pt, description FROM {} \
             WHERE is_translated = 1 AND title_pt IS NOT NULL AND description IS NOT NULL",
            quote_identifier(category.table_name())
        );
        let rows = diesel::sql_query(sql)
            .load::<TranslatedRow>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.upstream_id,
                    TranslatedText {
                        title_pt: row.title_pt,
                        description: row.description,
                    },
                )
            })
            .collect())
    }

    /// Single stored row by upstream id, if present.
    pub fn find_by_upstream_id(
        &self,
        category: Category,
        upstream_id: i64,
    ) -> Result<Option<CatalogItem>> {
        let mut conn = get_connection(&self.pool)?;
        let sql = format!(
            "SELECT id, upstream_id, title_original, title_pt, description, thumbnail, \
             is_translated, created_at, last_update FROM {} WHERE upstream_id = ?",
            quote_identifier(category.table_name())
        );
        let row = diesel::sql_query(sql)
            .bind::<BigInt, _>(upstream_id)
            .load::<CatalogRowDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .next();
        row.map(CatalogRowDB::into_domain).transpose()
    }
}

/// One insert-or-update keyed on `upstream_id`. `created_at` is written
/// only on first insert; the conflict arm never touches it.
fn upsert_one(
    conn: &mut SqliteConnection,
    table: &str,
    record: &CatalogRecord,
    now: &str,
) -> std::result::Result<usize, StorageError> {
    let sql = format!(
        "INSERT INTO {} (upstream_id, title_original, title_pt, description, thumbnail, \
         is_translated, created_at, last_update) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(upstream_id) DO UPDATE SET \
         title_original = excluded.title_original, \
         title_pt = excluded.title_pt, \
         description = excluded.description, \
         thumbnail = excluded.thumbnail, \
         is_translated = excluded.is_translated, \
         last_update = excluded.last_update",
        quote_identifier(table)
    );

    let affected = diesel::sql_query(sql)
        .bind::<BigInt, _>(record.upstream_id)
        .bind::<Text, _>(&record.title_original)
        .bind::<Nullable<Text>, _>(record.title_pt.as_deref())
        .bind::<Nullable<Text>, _>(record.description.as_deref())
        .bind::<Nullable<Text>, _>(record.thumbnail.as_deref())
        .bind::<Bool, _>(record.is_translated)
        .bind::<Text, _>(now)
        .bind::<Text, _>(now)
        .execute(conn)?;
    Ok(affected)
}

#[async_trait]
impl CatalogRepositoryTrait for CatalogRepository {
    async fn upsert_batch(&self, category: Category, records: Vec<CatalogRecord>) -> Result<usize> {
        let table = category.table_name();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = to_db_timestamp(Utc::now());
                let mut applied = 0;
                for record in &records {
                    match upsert_one(conn, table, record, &now) {
                        Ok(n) => applied += n,
                        // A failed row is retried naturally on the next
                        // tick; the rest of the batch still lands.
                        Err(e) => error!(
                            "{category}: failed to persist item {}: {e}",
                            record.upstream_id
                        ),
                    }
                }
                Ok(applied)
            })
            .await
    }

    async fn load_translated(&self, category: Category) -> Result<HashMap<i64, TranslatedText>> {
        self.load_translated_impl(category)
    }
}
