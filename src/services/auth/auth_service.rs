//! 로그인, 토큰 갱신, 로그아웃 서비스
//!
//! 리프레시 토큰은 발급 시 [`RefreshTokenStore`]에 등록되고,
//! 갱신에 한 번 사용되면 즉시 제거됩니다(토큰 회전).

use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::{TokenPair, TokenType};
use crate::repositories::{RefreshTokenStore, UserRepository};
use crate::services::auth::token_service::TokenService;
use crate::services::users::hash_password;

const LOGIN_ERROR: &str = "Incorrect username or password";
const CREDENTIALS_ERROR: &str = "Could not validate credentials";

/// 인증 서비스
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    token_service: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl AuthService {
    /// `bcrypt_cost`는 평문 비밀번호를 해시로 교체할 때 사용합니다.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        token_service: Arc<TokenService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            user_repo,
            refresh_tokens,
            token_service,
            bcrypt_cost,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// 사용자명/비밀번호 검증
    ///
    /// 저장된 값이 bcrypt 해시가 아니면(예전 시드 데이터) 평문으로 한 번 비교하고,
    /// 일치하면 즉시 bcrypt 해시로 교체합니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 사용자 없음 또는 비밀번호 불일치 (400, 같은 메시지)
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.user_repo.find_by_username(username).await? else {
            log::warn!("로그인 실패 - 존재하지 않는 사용자: {}", username);
            return Err(AppError::ValidationError(LOGIN_ERROR.to_string()));
        };

        let verified = if user.has_hashed_password() {
            bcrypt::verify(password, &user.password_hash)
                .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?
        } else {
            let matches = user.password_hash == password;
            if matches {
                self.upgrade_legacy_password(&user, password).await?;
            }
            matches
        };

        if !verified {
            log::warn!("로그인 실패 - 비밀번호 불일치: {}", username);
            return Err(AppError::ValidationError(LOGIN_ERROR.to_string()));
        }

        Ok(user)
    }

    async fn upgrade_legacy_password(&self, user: &User, password: &str) -> AppResult<()> {
        let Some(id) = user.id.as_ref() else {
            return Ok(());
        };

        let password_hash = hash_password(password, self.bcrypt_cost)?;
        self.user_repo.update_password_hash(id, &password_hash).await?;

        log::info!("🔐 평문 비밀번호를 bcrypt로 교체: {}", user.username);
        Ok(())
    }

    /// 토큰 쌍을 발급하고 리프레시 토큰을 저장소에 등록합니다.
    pub async fn issue_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        let pair = self.token_service.generate_token_pair(user)?;

        self.refresh_tokens
            .store(&pair.refresh_token, pair.refresh_expires_in as u64)
            .await?;

        Ok(pair)
    }

    /// 로그인: 인증 후 토큰 쌍 발급
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let user = self.authenticate(username, password).await?;
        let pair = self.issue_token_pair(&user).await?;

        log::info!("로그인 성공 - 사용자: {} ({})", user.username, user.role);
        Ok(pair)
    }

    /// 액세스 토큰으로 현재 사용자를 확인합니다.
    ///
    /// 토큰이 유효해도 사용자가 삭제되었다면 401입니다.
    /// 역할은 토큰이 아닌 저장된 사용자 정보를 따릅니다.
    pub async fn current_user(&self, access_token: &str) -> AppResult<AuthenticatedUser> {
        let claims = self.token_service.verify_token(access_token, TokenType::Access)?;
        let user = self.load_subject(claims.sub.as_deref()).await?;

        AuthenticatedUser::try_from(&user)
    }

    /// 리프레시 토큰을 새 토큰 쌍으로 교환합니다.
    ///
    /// 이전 리프레시 토큰은 저장소에서 제거되며, 저장소에 없는 토큰(이미 사용했거나
    /// 로그아웃한 토큰)은 서명이 유효해도 거부됩니다.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.token_service.verify_token(refresh_token, TokenType::Refresh)?;

        if claims.role.is_none() {
            return Err(AppError::AuthenticationError(CREDENTIALS_ERROR.to_string()));
        }
        let user = self.load_subject(claims.sub.as_deref()).await?;

        if !self.refresh_tokens.consume(refresh_token).await? {
            log::warn!("재사용되었거나 폐기된 리프레시 토큰: {}", user.username);
            return Err(AppError::AuthenticationError(
                "Refresh token has been revoked".to_string(),
            ));
        }

        let pair = self.issue_token_pair(&user).await?;
        log::debug!("토큰 갱신 완료: {}", user.username);

        Ok(pair)
    }

    /// 리프레시 토큰을 폐기합니다. 이미 없는 토큰이어도 성공입니다.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let claims = self.token_service.verify_token(refresh_token, TokenType::Refresh)?;

        if self.refresh_tokens.consume(refresh_token).await? {
            log::info!("로그아웃: {}", claims.sub.unwrap_or_default());
        }

        Ok(())
    }

    async fn load_subject(&self, subject: Option<&str>) -> AppResult<User> {
        let username =
            subject.ok_or_else(|| AppError::AuthenticationError(CREDENTIALS_ERROR.to_string()))?;

        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(CREDENTIALS_ERROR.to_string()))
    }
}
