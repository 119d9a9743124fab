//! SQL queries for different databases.

/// Query to find an account by identity (PostgreSQL).
pub const FIND_BY_IDENTITY_PG: &str = r#"
SELECT identity, secret, blocked, unlimited, max_usage_bytes, expiration_days,
       created_on, uploaded_bytes, downloaded_bytes
FROM accounts
WHERE identity = $1
"#;

/// Query to find an account by identity (MySQL/SQLite).
pub const FIND_BY_IDENTITY_MYSQL: &str = r#"
SELECT identity, secret, blocked, unlimited, max_usage_bytes, expiration_days,
       created_on, uploaded_bytes, downloaded_bytes
FROM accounts
WHERE identity = ?
"#;
