//! Database schema

/// SQL schema for initialization
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chat_id INTEGER NOT NULL UNIQUE,
    state TEXT NOT NULL DEFAULT '"initial"',
    property_type TEXT,
    price_range TEXT,
    bedrooms TEXT,
    furnished TEXT,
    area TEXT,
    created_at TEXT,
    updated_at TEXT
);
"#;

/// Columns added after the first release of the table. Adding an existing
/// column fails, which is ignored.
pub const MIGRATION_ADD_TIMESTAMPS: [&str; 2] = [
    "ALTER TABLE users ADD COLUMN created_at TEXT",
    "ALTER TABLE users ADD COLUMN updated_at TEXT",
];

/// Migration SQL to convert bare-string states to the typed JSON form
/// Runs at startup; rows already in JSON form are untouched
pub const MIGRATION_TYPED_STATE: &str = r#"
UPDATE users SET state = '"initial"' WHERE state IS NULL OR state = '' OR state = 'initial';
UPDATE users SET state = '"awaiting_price_range"' WHERE state = 'awaiting_price_range';
UPDATE users SET state = '"awaiting_bedrooms"' WHERE state = 'awaiting_bedrooms';
UPDATE users SET state = '"awaiting_furnished"' WHERE state = 'furnished_unfurnished';
UPDATE users SET state = '"awaiting_area"' WHERE state = 'selecting_area';
"#;
