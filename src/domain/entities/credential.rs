//! # CachedCredential Entity
//!
//! キャッシュされたOAuthトークンと、認証済みセッション

use chrono::{DateTime, Duration, Utc};

/// 期限切れ判定の余裕（秒）
///
/// アップロード中に失効しないよう、期限の少し前から期限切れとみなす
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// キャッシュされた認証情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedCredential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub scope: Option<String>,
}

impl CachedCredential {
    /// 指定時刻において期限切れかどうか
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at - Duration::seconds(EXPIRY_SKEW_SECS)
    }

    /// リフレッシュ可能かどうか
    pub fn can_refresh(&self) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    /// API呼び出し用のセッションを作成
    pub fn session(&self) -> Session {
        Session {
            access_token: self.access_token.clone(),
            token_type: self.token_type.clone(),
        }
    }
}

/// 認証済みセッション
///
/// Drive APIの呼び出しに必要な情報のみを持つ
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
    token_type: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
        }
    }

    /// `Authorization` ヘッダーの値
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

// トークンをログに出さない
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn credential(expires_at: DateTime<Utc>, refresh: Option<&str>) -> CachedCredential {
        CachedCredential {
            access_token: "ya29.token".to_string(),
            refresh_token: refresh.map(str::to_string),
            token_type: "Bearer".to_string(),
            expires_at,
            scope: None,
        }
    }

    #[test]
    fn test_not_expired_well_before_deadline() {
        let expires = Utc.with_ymd_and_hms(2024, 12, 25, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 12, 25, 11, 0, 0).unwrap();
        assert!(!credential(expires, None).is_expired(now));
    }

    #[test]
    fn test_expired_within_skew() {
        let expires = Utc.with_ymd_and_hms(2024, 12, 25, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 12, 25, 11, 59, 30).unwrap();
        assert!(credential(expires, None).is_expired(now));
    }

    #[test]
    fn test_expired_after_deadline() {
        let expires = Utc.with_ymd_and_hms(2024, 12, 25, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 12, 26, 0, 0, 0).unwrap();
        assert!(credential(expires, None).is_expired(now));
    }

    #[test]
    fn test_can_refresh() {
        let expires = Utc::now();
        assert!(credential(expires, Some("1//refresh")).can_refresh());
        assert!(!credential(expires, Some("")).can_refresh());
        assert!(!credential(expires, None).can_refresh());
    }

    #[test]
    fn test_session_authorization_header() {
        let session = credential(Utc::now(), None).session();
        assert_eq!(session.authorization_header(), "Bearer ya29.token");
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = Session::new("secret-token", "Bearer");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("Bearer"));
    }
}
