/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum length of a category slug. Derived slugs are truncated to this.
pub const SLUG_MAX_LENGTH: usize = 50;

/// Separator used when rendering a category's full ancestor path
pub const PATH_SEPARATOR: &str = " > ";
