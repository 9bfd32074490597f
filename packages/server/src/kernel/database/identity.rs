//! Prefixed, zero-padded string keys such as `PROV-0007`.

use super::error::DbError;
use super::router::QueryRouter;

/// Derives the next key from the greatest existing one. Not atomic: two
/// callers can compute the same key, so inserts using it must not merge
/// into an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentitySequence {
    pub table: &'static str,
    pub key_column: &'static str,
    pub prefix: &'static str,
    pub width: usize,
}

impl IdentitySequence {
    pub const fn new(
        table: &'static str,
        key_column: &'static str,
        prefix: &'static str,
        width: usize,
    ) -> Self {
        Self {
            table,
            key_column,
            prefix,
            width,
        }
    }

    pub async fn next(&self, db: &QueryRouter) -> Result<String, DbError> {
        let last = db
            .latest_key(self.table, self.key_column, self.prefix)
            .await?;
        Ok(self.following(last.as_deref()))
    }

    /// Key after `last`. Starts at 1 when there is no previous key or its
    /// numeric part does not parse.
    pub fn following(&self, last: Option<&str>) -> String {
        let number = last
            .and_then(|key| key.strip_prefix(self.prefix))
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|digits| digits.parse::<u64>().ok())
            .map_or(1, |n| n.saturating_add(1));
        self.format(number)
    }

    pub fn format(&self, number: u64) -> String {
        format!("{}-{:0width$}", self.prefix, number, width = self.width)
    }
}
