mod list;
pub use self::list::{ListQuery, Query, DEFAULT_LIMIT};
