use std::fmt::Display;

/// Builder for PostgREST table paths. Filters are appended only when the
/// caller has a value, which keeps the conditional filter-chaining in the
/// services down to one line per optional parameter.
#[derive(Debug, Clone)]
pub struct TableQuery {
    table: String,
    parts: Vec<String>,
}

impl TableQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            parts: Vec::new(),
        }
    }

    fn push(&mut self, column: &str, op: &str, value: &str) {
        self.parts
            .push(format!("{}={}.{}", column, op, urlencoding::encode(value)));
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.push(column, "eq", &value.to_string());
        self
    }

    pub fn neq(mut self, column: &str, value: impl Display) -> Self {
        self.push(column, "neq", &value.to_string());
        self
    }

    pub fn gte(mut self, column: &str, value: impl Display) -> Self {
        self.push(column, "gte", &value.to_string());
        self
    }

    pub fn lte(mut self, column: &str, value: impl Display) -> Self {
        self.push(column, "lte", &value.to_string());
        self
    }

    /// Case-insensitive substring match.
    pub fn contains(mut self, column: &str, value: &str) -> Self {
        self.push(column, "ilike", &format!("%{}%", value));
        self
    }

    /// Array-column membership (`cs` operator): the array contains `value`.
    pub fn contains_element(mut self, column: &str, value: &str) -> Self {
        self.push(column, "cs", &format!("{{{}}}", value));
        self
    }

    /// `in.(...)` filter over a set of ids.
    pub fn in_ids(mut self, column: &str, ids: &[i64]) -> Self {
        let list = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.parts.push(format!("{}=in.({})", column, list));
        self
    }

    /// Raw `or=(...)` disjunction; the caller is responsible for encoding.
    pub fn or(mut self, clause: &str) -> Self {
        self.parts.push(format!("or=({})", clause));
        self
    }

    pub fn order(mut self, spec: &str) -> Self {
        self.parts.push(format!("order={}", spec));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.parts.push(format!("limit={}", limit));
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.parts.push(format!("offset={}", offset));
        self
    }

    pub fn paginate(self, limit: i64, offset: i64) -> Self {
        self.limit(limit).offset(offset)
    }

    pub fn path(&self) -> String {
        if self.parts.is_empty() {
            format!("/rest/v1/{}", self.table)
        } else {
            format!("/rest/v1/{}?{}", self.table, self.parts.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_table_has_no_query_string() {
        assert_eq!(TableQuery::new("patients").path(), "/rest/v1/patients");
    }

    #[test]
    fn filters_chain_in_insertion_order() {
        let path = TableQuery::new("schedules")
            .eq("staff_id", 7)
            .eq("date", "2026-03-01")
            .paginate(100, 0)
            .path();

        assert_eq!(
            path,
            "/rest/v1/schedules?staff_id=eq.7&date=eq.2026-03-01&limit=100&offset=0"
        );
    }

    #[test]
    fn user_supplied_values_are_encoded() {
        let path = TableQuery::new("patients")
            .contains("last_name", "O'Brien & Sons")
            .path();

        assert!(path.starts_with("/rest/v1/patients?last_name=ilike."));
        assert!(!path.contains('\''));
        assert!(!path.contains(" & "));
    }
}
