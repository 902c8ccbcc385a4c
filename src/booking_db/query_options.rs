/// Sort key for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Id,
    Name,
}

/// Ordering and paging applied to `get_*s` list queries.
/// The default lists everything ordered by ascending id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub order_by: OrderBy,
    pub descending: bool,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            order_by: OrderBy::Id,
            descending: false,
            skip: None,
            take: None,
        }
    }
}

impl QueryOptions {
    pub fn by_name() -> Self {
        QueryOptions {
            order_by: OrderBy::Name,
            ..Default::default()
        }
    }

    pub fn page(mut self, skip: i64, take: i64) -> Self {
        self.skip = Some(skip);
        self.take = Some(take);
        self
    }

    /// SQLite requires a LIMIT whenever an OFFSET is given, -1 meaning 'no limit'.
    pub(super) fn limit(&self) -> Option<i64> {
        match (self.skip, self.take) {
            (_, Some(take)) => Some(take),
            (Some(_), None) => Some(-1),
            (None, None) => None,
        }
    }
}

/// Applies ordering and paging of a `QueryOptions` to a boxed diesel query.
/// `$id` is the tie breaker and primary sort key, `$name` the secondary sort key.
macro_rules! apply_query_options {
    ($query:expr, $options:expr, $id:expr, $name:expr) => {{
        let options: &QueryOptions = $options;
        let query = match (options.order_by, options.descending) {
            (OrderBy::Id, false) => $query.order($id.asc()),
            (OrderBy::Id, true) => $query.order($id.desc()),
            (OrderBy::Name, false) => $query.order(($name.asc(), $id.asc())),
            (OrderBy::Name, true) => $query.order(($name.desc(), $id.desc())),
        };
        let query = match options.limit() {
            Some(limit) => query.limit(limit),
            None => query,
        };
        match options.skip {
            Some(skip) => query.offset(skip),
            None => query,
        }
    }};
}
