//! SQL builder with parameterized query construction.
//!
//! All caller-supplied values go through DuckDB's parameter binding (`?`
//! placeholders), never through string interpolation. Builder methods return
//! `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use booking_pricing::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("settlement_variants")
//!     .where_eq("room_id", 12)
//!     .where_gte("settlement", 2)
//!     .order_by(&["settlement ASC", "id ASC"])
//!     .limit(1)
//!     .build();
//! assert_eq!(params, vec!["12", "2"]);
//! ```

/// Builds parameterized SQL queries.
///
/// WHERE parameters always precede HAVING parameters in the output, whatever
/// order the conditions were added in.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    is_distinct: bool,
    from_table: String,
    joins: Vec<String>,
    where_clauses: Vec<String>,
    where_params: Vec<String>,
    group_by_cols: Vec<String>,
    having_clauses: Vec<String>,
    having_params: Vec<String>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table (an alias may follow the
    /// name, e.g. `"place_prices pp"`).
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            is_distinct: false,
            from_table: table.to_string(),
            joins: Vec::new(),
            where_clauses: Vec::new(),
            where_params: Vec::new(),
            group_by_cols: Vec::new(),
            having_clauses: Vec::new(),
            having_params: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
            offset_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.is_distinct = true;
        self
    }

    /// Add a full JOIN expression, e.g. `"JOIN rooms r ON r.id = sv.room_id"`.
    pub fn join(&mut self, clause: &str) -> &mut Self {
        self.joins.push(clause.to_string());
        self
    }

    /// Add a raw WHERE condition using `?` for each of `params`.
    pub fn where_clause<P: ToString>(&mut self, condition: &str, params: &[P]) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.where_params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// `{column} = ?`
    pub fn where_eq(&mut self, column: &str, value: impl ToString) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.where_params.push(value.to_string());
        self
    }

    /// `{column} > ?`
    pub fn where_gt(&mut self, column: &str, value: impl ToString) -> &mut Self {
        self.where_clauses.push(format!("{} > ?", column));
        self.where_params.push(value.to_string());
        self
    }

    /// `{column} >= ?`
    pub fn where_gte(&mut self, column: &str, value: impl ToString) -> &mut Self {
        self.where_clauses.push(format!("{} >= ?", column));
        self.where_params.push(value.to_string());
        self
    }

    /// `{column} <= ?`
    pub fn where_lte(&mut self, column: &str, value: impl ToString) -> &mut Self {
        self.where_clauses.push(format!("{} <= ?", column));
        self.where_params.push(value.to_string());
        self
    }

    /// `{column} IN (?, ...)`. An empty list matches nothing.
    pub fn where_in<P: ToString>(&mut self, column: &str, values: &[P]) -> &mut Self {
        if values.is_empty() {
            self.where_clauses.push("FALSE".to_string());
            return self;
        }
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        self.where_clauses
            .push(format!("{} IN ({})", column, placeholders.join(", ")));
        self.where_params.extend(values.iter().map(|v| v.to_string()));
        self
    }

    /// Inclusive date range on a DATE column; the bounds are ISO strings.
    pub fn where_date_between(
        &mut self,
        column: &str,
        from: impl ToString,
        to: impl ToString,
    ) -> &mut Self {
        self.where_clauses.push(format!(
            "{} BETWEEN CAST(? AS DATE) AND CAST(? AS DATE)",
            column
        ));
        self.where_params.push(from.to_string());
        self.where_params.push(to.to_string());
        self
    }

    /// Equality on a DATE column.
    pub fn where_date_eq(&mut self, column: &str, date: impl ToString) -> &mut Self {
        self.where_clauses
            .push(format!("{} = CAST(? AS DATE)", column));
        self.where_params.push(date.to_string());
        self
    }

    /// DATE column on or before the given day.
    pub fn where_date_lte(&mut self, column: &str, date: impl ToString) -> &mut Self {
        self.where_clauses
            .push(format!("{} <= CAST(? AS DATE)", column));
        self.where_params.push(date.to_string());
        self
    }

    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by_cols.extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add a HAVING condition using `?` for each of `params`.
    pub fn having<P: ToString>(&mut self, condition: &str, params: &[P]) -> &mut Self {
        self.having_clauses.push(condition.to_string());
        self.having_params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Add ORDER BY clauses (e.g. `"settlement ASC"`, `"date DESC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols.extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let distinct = if self.is_distinct { "DISTINCT " } else { "" };
        let mut parts = vec![
            format!("SELECT {}{}", distinct, self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        parts.extend(self.joins.iter().cloned());

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }
        if !self.group_by_cols.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by_cols.join(", ")));
        }
        if !self.having_clauses.is_empty() {
            parts.push(format!("HAVING {}", self.having_clauses.join(" AND ")));
        }
        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }
        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }
        if let Some(n) = self.offset_val {
            parts.push(format!("OFFSET {}", n));
        }

        let mut params = self.where_params.clone();
        params.extend(self.having_params.iter().cloned());
        (parts.join("\n"), params)
    }
}
