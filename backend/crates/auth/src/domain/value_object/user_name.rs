//! User Name Value Object
//!
//! ユーザー名は、ユーザーを識別するための公開ハンドル。
//! ダッシュボード表示とアカウント検索に使用される。
//!
//! ## 設計方針
//! - ASCII文字のみ許可（a-z, A-Z, 0-9, _ . -）
//! - 入力時の大文字小文字は保持し、canonical（一意性判定用）は小文字
//! - NFKC正規化 → 検証 → 小文字化 の順で処理
//!
//! ## 不変条件
//! - 長さ: 3〜30文字（正規化後）
//! - 先頭・末尾: 英数字または `_`
//! - 連続ドット禁止（`..`）
//! - 英数字を最低1文字含む

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Handles that would be mistaken for staff or system accounts
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "support",
    "counselor",
    "consultant",
    "checkin",
    "api",
    "null",
    "undefined",
    "me",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let original = normalized.trim().to_string();

        let len = original.chars().count();
        if len < USER_NAME_MIN_LENGTH || len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be {USER_NAME_MIN_LENGTH}-{USER_NAME_MAX_LENGTH} characters"
            )));
        }

        if !original
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c))
        {
            return Err(AppError::bad_request(
                "Username may only contain letters, digits, '_', '.' and '-'",
            ));
        }

        let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if !edge_ok(original.chars().next()) || !edge_ok(original.chars().last()) {
            return Err(AppError::bad_request(
                "Username must start and end with a letter, digit or '_'",
            ));
        }

        if original.contains("..") {
            return Err(AppError::bad_request("Username cannot contain '..'"));
        }

        if !original.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::bad_request(
                "Username must contain at least one letter or digit",
            ));
        }

        let canonical = original.to_ascii_lowercase();

        if RESERVED_WORDS.contains(&canonical.as_str()) {
            return Err(AppError::bad_request("This username is reserved"));
        }

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Restore from database columns (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_ascii_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// As typed at registration
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lower-cased form used for uniqueness
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        for name in ["thandi", "Thandi_M", "j.doe", "peer-support-7", "_kai_", "abc"] {
            assert!(UserName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_user_names() {
        for name in ["ab", "", "   ", "has space", "émile", ".dot", "dash-", "a..b", "___", "Admin"] {
            assert!(UserName::new(name).is_err(), "{name:?} should be rejected");
        }
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = UserName::new("  Thandi_M ").unwrap();
        assert_eq!(name.original(), "Thandi_M");
        assert_eq!(name.canonical(), "thandi_m");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth input normalizes to ASCII
        let name = UserName::new("ｔｈａｎｄｉ").unwrap();
        assert_eq!(name.canonical(), "thandi");
    }
}
