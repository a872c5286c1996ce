//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

use serde::Serialize;

/// エラー種別の列挙体
///
/// 各バリアントは HTTP ステータスコードに 1 対 1 で対応します。
/// 拒否の発生箇所に関係なく、ステータスは常にこの種別から決まります。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unauthorized;
/// assert_eq!(kind.status_code(), 401);
/// assert_eq!(kind.as_str(), "Unauthorized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - 入力検証エラー（必須項目の欠落など）
    BadRequest,
    /// 401 - トークンなし / 無効 / ユーザー消失
    Unauthorized,
    /// 403 - ロール不足
    Forbidden,
    /// 404 - ルート不一致
    NotFound,
    /// 409 - 一意制約違反
    Conflict,
    /// 500 - 設定エラー・未処理エラー
    InternalServerError,
    /// 503 - 依存サービス（DB など）利用不可
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// HTTP の標準的な理由フレーズ
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// 5xx 系か（ログに error レベルで記録すべきもの）
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 4xx 系か
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
    }

    #[test]
    fn test_error_classes() {
        assert!(ErrorKind::Unauthorized.is_client_error());
        assert!(!ErrorKind::Unauthorized.is_server_error());
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(!ErrorKind::InternalServerError.is_client_error());
    }
}
