//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use std::time::Duration;

use ea_shared::{mask_email, CodeKeyStrategy};

use crate::domain::entities::{PendingIdentity, Purpose, VerificationCode};
use crate::domain::value_objects::{IssuedCode, IssuedIdentity, Registration, VerificationOutcome};
use crate::errors::{AuthError, DomainError, DomainResult, StoreError};
use crate::services::store::{keys, Deadline, RecordStore, RecordStoreExt};

use super::config::VerificationServiceConfig;
use super::generators::{RandomCodeGenerator, UuidSessionIdGenerator};
use super::traits::{CodeGenerator, EmailSender, SessionIdGenerator};

/// Budget for a store health check
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Verification service for the identity/code handshake
///
/// Holds no state of its own; everything lives in the record store under a
/// TTL, so any number of instances can share one store.
pub struct VerificationService<S: RecordStore + ?Sized, E: EmailSender + ?Sized> {
    /// Ephemeral record store
    store: Arc<S>,
    /// Email delivery
    email: Arc<E>,
    /// Service configuration
    config: VerificationServiceConfig,
    session_ids: Arc<dyn SessionIdGenerator>,
    codes: Arc<dyn CodeGenerator>,
}

impl<S: RecordStore + ?Sized, E: EmailSender + ?Sized> VerificationService<S, E> {
    /// Create a new verification service with the default generators
    pub fn new(store: Arc<S>, email: Arc<E>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            email,
            config,
            session_ids: Arc::new(UuidSessionIdGenerator),
            codes: Arc::new(RandomCodeGenerator),
        }
    }

    pub fn with_session_id_generator(mut self, generator: Arc<dyn SessionIdGenerator>) -> Self {
        self.session_ids = generator;
        self
    }

    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.codes = generator;
        self
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Report whether the record store is reachable
    pub async fn check_store(&self) -> DomainResult<()> {
        let deadline = Deadline::after(self.config.operation_timeout.min(HEALTH_CHECK_TIMEOUT));
        self.store.health_check(deadline).await.map_err(|e| {
            tracing::warn!(error = %e, "Record store health check failed");
            DomainError::from(e)
        })
    }

    /// Create a pending identity for a new account and send its first code
    pub async fn signup(&self, registration: Registration) -> DomainResult<IssuedIdentity> {
        self.register(Purpose::Signup, registration).await
    }

    /// Create a pending identity for a returning user and send its first code
    pub async fn signin(&self, registration: Registration) -> DomainResult<IssuedIdentity> {
        self.register(Purpose::Signin, registration).await
    }

    /// Create a pending identity and send its first code
    ///
    /// The identity is written before the code is generated. A failure after
    /// that write leaves the identity in place until its TTL elapses.
    pub async fn register(
        &self,
        purpose: Purpose,
        registration: Registration,
    ) -> DomainResult<IssuedIdentity> {
        let deadline = Deadline::after(self.config.operation_timeout);
        let identity = PendingIdentity::new(self.session_ids.generate(), registration, purpose);

        self.store
            .put_json(
                &keys::identity_key(&identity.id),
                &identity,
                self.config.identity_ttl,
                deadline,
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    purpose = %purpose,
                    error = %e,
                    event = "identity_storage_failed",
                    "Failed to store pending identity"
                );
                DomainError::from(e)
            })?;

        tracing::info!(
            email = %mask_email(&identity.email),
            session_id = %identity.id,
            purpose = %purpose,
            event = "identity_issued",
            "Created pending identity"
        );

        let issued = self.issue_code(&identity, deadline).await?;

        Ok(IssuedIdentity {
            session_id: identity.id,
            purpose,
            code_expires_in: issued.expires_in,
        })
    }

    /// Generate, store and send a fresh code for an existing session
    ///
    /// With code-value keys earlier codes are left alone and stay valid until
    /// their own TTL. With session-scoped keys the fresh code replaces the
    /// previous one.
    pub async fn reissue_code(&self, session_id: &str) -> DomainResult<IssuedCode> {
        let deadline = Deadline::after(self.config.operation_timeout);

        let identity: PendingIdentity = self
            .store
            .get_json(&keys::identity_key(session_id), deadline)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => {
                    tracing::info!(
                        session_id = session_id,
                        event = "session_expired",
                        "Code re-issue requested for unknown session"
                    );
                    DomainError::Auth(AuthError::SessionExpired)
                }
                other => DomainError::from(other),
            })?;

        self.issue_code(&identity, deadline).await
    }

    /// Check `code` against the session and report the identity's purpose
    pub async fn verify(&self, session_id: &str, code: &str) -> DomainResult<VerificationOutcome> {
        if !VerificationCode::is_well_formed(code) {
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        let deadline = Deadline::after(self.config.operation_timeout);

        let identity: PendingIdentity = self
            .store
            .get_json(&keys::identity_key(session_id), deadline)
            .await
            .map_err(Self::missing_as_rejection)?;

        let code_key = self.code_key(code, session_id);
        let record: VerificationCode = self
            .store
            .get_json(&code_key, deadline)
            .await
            .map_err(Self::missing_as_rejection)?;

        if self.config.code_key_strategy == CodeKeyStrategy::SessionScoped
            && !constant_time_eq(record.code.as_bytes(), code.as_bytes())
        {
            tracing::warn!(
                session_id = session_id,
                event = "verification_rejected",
                reason = "code_mismatch",
                "Verification code did not match"
            );
            return Err(AuthError::InvalidCode.into());
        }

        if !record.belongs_to(&identity) {
            tracing::warn!(
                email = %mask_email(&identity.email),
                session_id = session_id,
                event = "verification_rejected",
                reason = "email_mismatch",
                "Verification code was issued for a different address"
            );
            return Err(AuthError::InvalidCode.into());
        }

        if self.config.single_use && !self.store.delete(&code_key, deadline).await? {
            // Another request consumed the code between our read and delete
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        tracing::info!(
            email = %mask_email(&identity.email),
            session_id = session_id,
            purpose = %identity.purpose,
            event = "verification_succeeded",
            "Verification code accepted"
        );

        Ok(VerificationOutcome::new(identity.id, identity.purpose))
    }

    async fn issue_code(
        &self,
        identity: &PendingIdentity,
        deadline: Deadline,
    ) -> DomainResult<IssuedCode> {
        let code = self.codes.generate();
        let record = VerificationCode::new(identity, code.clone(), self.config.code_ttl);

        self.store
            .put_json(
                &self.code_key(&code, &identity.id),
                &record,
                self.config.code_ttl,
                deadline,
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    session_id = %identity.id,
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code"
                );
                DomainError::from(e)
            })?;

        self.deliver(&identity.email, &code, deadline).await?;

        tracing::info!(
            email = %mask_email(&identity.email),
            session_id = %identity.id,
            ttl_seconds = self.config.code_ttl.as_secs(),
            event = "code_issued",
            "Verification code sent"
        );

        Ok(IssuedCode {
            session_id: identity.id.clone(),
            expires_in: self.config.code_ttl,
        })
    }

    async fn deliver(&self, to: &str, code: &str, deadline: Deadline) -> DomainResult<()> {
        let send = self.email.send(to, &self.config.email_subject, code);

        match tokio::time::timeout_at(deadline.instant(), send).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => {
                tracing::error!(
                    email = %mask_email(to),
                    error = %message,
                    event = "code_delivery_failed",
                    "Failed to send verification email"
                );
                Err(AuthError::DeliveryFailed { message }.into())
            }
            Err(_) => Err(DomainError::Timeout {
                operation: "email".to_string(),
            }),
        }
    }

    fn code_key(&self, code: &str, session_id: &str) -> String {
        match self.config.code_key_strategy {
            CodeKeyStrategy::CodeValue => keys::code_key(code),
            CodeKeyStrategy::SessionScoped => keys::session_code_key(session_id),
        }
    }

    fn missing_as_rejection(error: StoreError) -> DomainError {
        match error {
            StoreError::NotFound { .. } => AuthError::InvalidOrExpiredCode.into(),
            other => other.into(),
        }
    }
}
