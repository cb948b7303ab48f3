//! Table definitions.

/// Idempotent schema creation.
///
/// `name_folded` holds the Unicode lowercase of `name`; SQLite's NOCASE
/// collation only folds ASCII, which would miss Cyrillic names. Its
/// unique index makes disease names unique ignoring case.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS symptoms (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS diseases (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    name_folded TEXT NOT NULL,
    description TEXT NOT NULL,
    treatment   TEXT NOT NULL,
    symptoms    TEXT NOT NULL DEFAULT '[]',
    severity    TEXT NOT NULL DEFAULT 'unknown',
    specialist  TEXT NOT NULL,
    category    TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_diseases_name_folded ON diseases(name_folded);
";
