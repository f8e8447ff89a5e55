//! Controlador de autenticación y cuentas
//!
//! Registro, login, gestión de administradores (super admin) y el flujo
//! de reset de password por email. El token de reset se guarda hasheado
//! con SHA-256 y caduca a los 10 minutos.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{
    AuthResponse, CreateAdminRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, UserResponse,
};
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::services::email_service::{EmailMessage, EmailService};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

const RESET_TOKEN_TTL_MINUTES: i64 = 10;

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
    mailer: EmailService,
    client_url: String,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig, mailer: EmailService) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config: JwtConfig::from(config),
            mailer,
            client_url: config.client_url.clone(),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(bad_request_error("User already exists"));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let user = self
            .repository
            .create(
                request.name,
                request.email,
                password_hash,
                request.phone,
                UserRole::User,
                false,
            )
            .await?;

        let token = generate_token(user.id, user.role.as_str(), &self.jwt_config)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let password_valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;

        if !password_valid {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        let token = generate_token(user.id, user.role.as_str(), &self.jwt_config)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Crear un administrador normal (sólo super admin)
    pub async fn create_admin(&self, request: CreateAdminRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(bad_request_error("User already exists"));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let admin = self
            .repository
            .create(
                request.name,
                request.email,
                password_hash,
                request.phone,
                UserRole::Admin,
                false,
            )
            .await?;

        Ok(UserResponse::from(admin))
    }

    pub async fn list_admins(&self) -> Result<Vec<UserResponse>, AppError> {
        let admins = self.repository.find_admins().await?;
        Ok(admins.into_iter().map(UserResponse::from).collect())
    }

    pub async fn delete_admin(&self, id: Uuid) -> Result<(), AppError> {
        let admin = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

        if admin.is_super_admin {
            return Err(AppError::Forbidden("Cannot delete super admin".to_string()));
        }

        if admin.role != UserRole::Admin {
            return Err(bad_request_error("User is not an admin"));
        }

        self.repository.delete(id).await
    }

    /// Emitir un token de reset y enviarlo por email. Si el email no puede
    /// enviarse, el token se invalida antes de devolver el error.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> Result<(), AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut token_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let reset_token = hex::encode(token_bytes);
        let token_hash = hash_reset_token(&reset_token);

        let expires = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
        self.repository
            .set_reset_token(user.id, Some(token_hash), Some(expires))
            .await?;

        let reset_url = format!("{}/reset-password/{}", self.client_url, reset_token);
        let message = EmailMessage {
            to: user.email.clone(),
            subject: "Password Reset Token".to_string(),
            text: format!(
                "You are receiving this email because you (or someone else) has requested \
                 the reset of a password. Please go to: {}",
                reset_url
            ),
            html: format!(
                "<h1>You have requested a password reset</h1>\
                 <p>Please go to this link to reset your password:</p>\
                 <a href=\"{}\">{}</a>",
                reset_url, reset_url
            ),
        };

        if let Err(e) = self.mailer.send(message).await {
            tracing::error!("Error enviando email de reset: {}", e);
            self.repository.set_reset_token(user.id, None, None).await?;
            return Err(AppError::Internal("Email could not be sent".to_string()));
        }

        Ok(())
    }

    /// Verificar el token de reset y fijar el nuevo password
    pub async fn reset_password(
        &self,
        token: &str,
        request: ResetPasswordRequest,
    ) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let token_hash = hash_reset_token(token);

        let user = self
            .repository
            .find_by_reset_token(&token_hash, Utc::now())
            .await?
            .ok_or_else(|| bad_request_error("Invalid token"))?;

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        self.repository.update_password(user.id, password_hash).await?;

        let token = generate_token(user.id, user.role.as_str(), &self.jwt_config)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }
}

/// SHA-256 hex del token de reset: en la base sólo se guarda el hash
fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_reset_token_is_stable_sha256_hex() {
        let a = hash_reset_token("token-123");
        let b = hash_reset_token("token-123");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_reset_token("token-124"));
    }
}
