use crate::entities::{prelude::*, search_counters};
use crate::models::{NewSearchCounter, SearchCounter};
use chrono::SecondsFormat;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

// Fixed width so the text column sorts chronologically.
fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Repository for search counter rows
pub struct CounterRepository {
    conn: DatabaseConnection,
}

impl CounterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: search_counters::Model) -> SearchCounter {
        SearchCounter {
            id: m.id,
            search_term: m.search_term,
            count: m.count,
            movie_id: m.movie_id,
            poster_url: m.poster_url,
        }
    }

    /// First row for the term, oldest id first when duplicates exist.
    pub async fn find_by_term(&self, term: &str) -> Result<Option<SearchCounter>, DbErr> {
        let row = SearchCounters::find()
            .filter(search_counters::Column::SearchTerm.eq(term))
            .order_by_asc(search_counters::Column::CreatedAt)
            .order_by_asc(search_counters::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    pub async fn insert(&self, counter: NewSearchCounter) -> Result<SearchCounter, DbErr> {
        let now = timestamp();

        let active_model = search_counters::ActiveModel {
            id: Set(counter.id),
            search_term: Set(counter.search_term),
            count: Set(1),
            movie_id: Set(counter.movie_id),
            poster_url: Set(counter.poster_url),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.conn).await?;
        Ok(Self::map_model(model))
    }

    /// Returns the number of rows touched (0 when the id is unknown).
    pub async fn set_count(&self, id: &str, count: i64) -> Result<u64, DbErr> {
        let result = SearchCounters::update_many()
            .col_expr(search_counters::Column::Count, Expr::value(count))
            .col_expr(
                search_counters::Column::UpdatedAt,
                Expr::value(timestamp()),
            )
            .filter(search_counters::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn top_by_count(&self, limit: u64) -> Result<Vec<SearchCounter>, DbErr> {
        let rows = SearchCounters::find()
            .order_by_desc(search_counters::Column::Count)
            .order_by_asc(search_counters::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }
}
