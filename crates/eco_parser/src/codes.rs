//! Diagnostic codes emitted by the input parsers.

use eco_diagnostics::{Category, DiagnosticCode};

/// A field that should be a number is not one.
pub const BAD_NUMBER: DiagnosticCode = DiagnosticCode::new(Category::Parse, 401);
/// A line has the wrong number of fields.
pub const FIELD_COUNT: DiagnosticCode = DiagnosticCode::new(Category::Parse, 402);
/// A cell's fixed flag is neither `FIX` nor `NOTFIX`.
pub const BAD_FIXED_FLAG: DiagnosticCode = DiagnosticCode::new(Category::Parse, 403);
/// The layout has no `DieSize` line.
pub const MISSING_DIE: DiagnosticCode = DiagnosticCode::new(Category::Parse, 404);
/// The layout has no `PlacementRows` line.
pub const MISSING_ROWS: DiagnosticCode = DiagnosticCode::new(Category::Parse, 405);
/// Two layout cells share a name.
pub const DUPLICATE_CELL: DiagnosticCode = DiagnosticCode::new(Category::Parse, 406);
/// A plan line has no `-->` separator.
pub const MISSING_ARROW: DiagnosticCode = DiagnosticCode::new(Category::Parse, 407);
/// A moves block ends early.
pub const TRUNCATED_BLOCK: DiagnosticCode = DiagnosticCode::new(Category::Parse, 408);
/// A move count is not a non-negative integer.
pub const BAD_COUNT: DiagnosticCode = DiagnosticCode::new(Category::Parse, 409);

/// `Alpha` or `Beta` is absent and defaults to 0.
pub const MISSING_WEIGHT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 501);
/// A plan line that is not a `Banking_Cell:` entry.
pub const IGNORED_PLAN_LINE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 502);
/// A layout line that matches no record shape.
pub const IGNORED_LAYOUT_LINE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 503);
/// A keyword line appears more than once; the last one wins.
pub const REPEATED_KEYWORD: DiagnosticCode = DiagnosticCode::new(Category::Warning, 504);
