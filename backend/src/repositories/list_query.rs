//! Translates URL query parameters into filters, ordering and pagination.

use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;

use crate::error::AppError;
use crate::repositories::common::push_clause;

pub const MAX_LIMIT: i64 = 1000;

const RESERVED_KEYS: [&str; 4] = ["limit", "offset", "order_by", "order"];
const ORDERABLE_TIMESTAMPS: [&str; 2] = ["created_at", "updated_at"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListQueryError {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),
    #[error("Invalid value for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Invalid sort order: {0}")]
    InvalidOrder(String),
}

impl From<ListQueryError> for AppError {
    fn from(err: ListQueryError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Equality filter on a whitelisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<(&'static str, SortDirection)>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    /// Builds a query from raw parameters. Only `columns` may be filtered or
    /// ordered on (plus the timestamps for ordering).
    pub fn from_params(
        params: &HashMap<String, String>,
        columns: &[&'static str],
    ) -> Result<Self, ListQueryError> {
        let mut query = ListQuery::default();

        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();
        for key in keys {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            let column = lookup(columns, key)
                .ok_or_else(|| ListQueryError::UnknownField(key.clone()))?;
            query.filters.push(FieldFilter {
                column,
                value: params[key].clone(),
            });
        }

        if let Some(raw) = params.get("limit") {
            let limit = parse_number("limit", raw)?;
            if limit < 1 {
                return Err(ListQueryError::InvalidNumber {
                    field: "limit",
                    value: raw.clone(),
                });
            }
            query.limit = Some(limit.min(MAX_LIMIT));
        }

        if let Some(raw) = params.get("offset") {
            let offset = parse_number("offset", raw)?;
            if offset < 0 {
                return Err(ListQueryError::InvalidNumber {
                    field: "offset",
                    value: raw.clone(),
                });
            }
            query.offset = Some(offset);
        }

        if let Some(raw) = params.get("order_by") {
            let column = lookup(columns, raw)
                .or_else(|| lookup(&ORDERABLE_TIMESTAMPS, raw))
                .ok_or_else(|| ListQueryError::UnknownField(raw.clone()))?;
            let direction = match params.get("order").map(|o| o.to_ascii_lowercase()) {
                None => SortDirection::Asc,
                Some(order) if order == "asc" => SortDirection::Asc,
                Some(order) if order == "desc" => SortDirection::Desc,
                Some(order) => return Err(ListQueryError::InvalidOrder(order)),
            };
            query.order_by = Some((column, direction));
        }

        Ok(query)
    }

    /// Appends the filters as `<qualifier><column>::text = $n` clauses.
    pub fn push_filters(
        &self,
        builder: &mut QueryBuilder<'_, Postgres>,
        qualifier: &str,
        has_clause: &mut bool,
    ) {
        for filter in &self.filters {
            push_clause(builder, has_clause);
            builder
                .push(format!("{}{}::text = ", qualifier, filter.column))
                .push_bind(filter.value.clone());
        }
    }

    /// Appends ORDER BY, LIMIT and OFFSET. Falls back to `default_order`.
    pub fn push_order_and_page(
        &self,
        builder: &mut QueryBuilder<'_, Postgres>,
        qualifier: &str,
        default_order: &str,
    ) {
        match self.order_by {
            Some((column, direction)) => {
                builder.push(format!(
                    " ORDER BY {}{} {}",
                    qualifier,
                    column,
                    direction.as_sql()
                ));
            }
            None => {
                builder.push(format!(" ORDER BY {}{}", qualifier, default_order));
            }
        }
        if let Some(limit) = self.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = self.offset {
            builder.push(" OFFSET ").push_bind(offset);
        }
    }
}

fn lookup(columns: &[&'static str], key: &str) -> Option<&'static str> {
    columns.iter().copied().find(|column| *column == key)
}

fn parse_number(field: &'static str, raw: &str) -> Result<i64, ListQueryError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ListQueryError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
