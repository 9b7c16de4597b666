/// MIGRATION 0001: Initial database schema.
pub const MIGRATION_0001: &str = r#"
-- State Slots Table: Named client-durable key/value entries.
-- Holds the active bucket index, the serialized bucket collection and
-- the current share code, each written on every relevant change.
CREATE TABLE IF NOT EXISTS state_slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    expires_at INTEGER NOT NULL, -- Unix timestamp; expired rows read as absent
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_state_slots_expires_at ON state_slots (expires_at);
"#;
