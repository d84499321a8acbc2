//! Property search query construction.
//!
//! Listings can be filtered by any combination of city, owner, price
//! bounds, and minimum average rating. [`SearchQuery::build`] folds the
//! filters that are present into one parameterized statement: `WHERE` for
//! the first predicate, `AND` for each one after, every value bound by
//! its 1-based position in the parameter list. The builder does no I/O,
//! so clause composition is testable without a database.

use serde::Deserialize;

/// Rows returned when the caller does not ask for a specific limit.
pub const DEFAULT_LIMIT: i64 = 10;

/// Filter values arrive in dollars; `cost_per_night` is stored in cents.
const CENTS_PER_DOLLAR: i64 = 100;

/// Base statement: every listing column plus the average review rating.
/// The LEFT JOIN keeps listings with no reviews in the result set.
const BASE_SELECT: &str = "\
SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating
FROM properties
LEFT JOIN property_reviews ON property_reviews.property_id = properties.id
";

/// Optional property search filters. Absent field = no filter applied.
///
/// `owner_id` is purely data-driven: the caller decides whether to scope
/// results to the signed-in user, this layer performs no session check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    /// Lower bound on nightly price, in dollars (inclusive).
    pub minimum_price_per_night: Option<i64>,
    /// Upper bound on nightly price, in dollars (inclusive).
    pub maximum_price_per_night: Option<i64>,
    /// Lower bound on the average review rating (inclusive).
    pub minimum_rating: Option<i32>,
}

/// A value bound to a positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParam {
    Text(String),
    Int(i64),
}

/// An assembled search statement and its parameters, in bind order.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    sql: String,
    params: Vec<SearchParam>,
    has_conditions: bool,
}

impl SearchQuery {
    /// Assemble the search statement for the given filters.
    ///
    /// Predicate order is fixed: city, owner_id, minimum price, maximum
    /// price; then `GROUP BY`; then the rating bound as `HAVING` (it
    /// filters on an aggregate, so `WHERE` would be rejected); then
    /// `ORDER BY cost_per_night` with the limit bound last.
    pub fn build(options: &PropertySearch, limit: Option<i64>) -> Self {
        let mut query = Self {
            sql: String::from(BASE_SELECT),
            params: Vec::new(),
            has_conditions: false,
        };

        let filters = [
            (
                options
                    .city
                    .as_deref()
                    .map(|city| SearchParam::Text(format!("%{city}%"))),
                "properties.city LIKE",
            ),
            (
                options.owner_id.map(|id| SearchParam::Int(id.into())),
                "properties.owner_id =",
            ),
            (
                options
                    .minimum_price_per_night
                    .map(|dollars| SearchParam::Int(dollars * CENTS_PER_DOLLAR)),
                "properties.cost_per_night >=",
            ),
            (
                options
                    .maximum_price_per_night
                    .map(|dollars| SearchParam::Int(dollars * CENTS_PER_DOLLAR)),
                "properties.cost_per_night <=",
            ),
        ];

        for (param, predicate) in filters {
            if let Some(param) = param {
                query.push_filter(predicate, param);
            }
        }

        query.sql.push_str("GROUP BY properties.id\n");

        if let Some(rating) = options.minimum_rating {
            query.params.push(SearchParam::Int(rating.into()));
            query.sql.push_str(&format!(
                "HAVING avg(property_reviews.rating) >= ${}\n",
                query.params.len()
            ));
        }

        query.params.push(SearchParam::Int(limit.unwrap_or(DEFAULT_LIMIT)));
        query.sql.push_str(&format!(
            "ORDER BY properties.cost_per_night\nLIMIT ${}\n",
            query.params.len()
        ));

        query
    }

    /// Append one predicate, binding its value at the next position.
    /// Deriving the placeholder index from the push keeps the clause and
    /// its parameter in lockstep no matter which filters are present.
    fn push_filter(&mut self, predicate: &str, param: SearchParam) {
        self.params.push(param);
        let keyword = if self.has_conditions { "AND" } else { "WHERE" };
        self.sql
            .push_str(&format!("{keyword} {predicate} ${}\n", self.params.len()));
        self.has_conditions = true;
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SearchParam] {
        &self.params
    }
}
