/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// FIELD LIMITS
// =============================================================================

/// Maximum slug length (shared by categories and courses)
pub const SLUG_MAX_LENGTH: usize = 50;

/// Language assigned to a course when none is given
pub const DEFAULT_COURSE_LANGUAGE: &str = "English";
