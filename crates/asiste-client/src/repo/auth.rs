//! Session lifecycle: login, logout, current-user queries and password
//! change.

use asiste_common::api::CODE_OK;
use asiste_common::models::session::User;

use crate::cache::HomeCache;
use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::lifecycle::SessionEvents;
use crate::store::SessionStore;
use crate::token::decode_claims;

pub struct AuthRepository {
    client: ApiClient,
    session: SessionStore,
    cache: HomeCache,
    events: SessionEvents,
}

impl AuthRepository {
    pub fn new(
        client: ApiClient,
        session: SessionStore,
        cache: HomeCache,
        events: SessionEvents,
    ) -> Self {
        Self {
            client,
            session,
            cache,
            events,
        }
    }

    /// Authenticates and persists the session.
    ///
    /// The caches are cleared unconditionally up front: even if this login
    /// fails later, the previous user's cached reads must already be gone.
    /// Validation failures are local and never reach the network.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, dni: &str, password: &str) -> ApiResult<User> {
        self.cache.clear_all();

        if dni.trim().is_empty() {
            return Err(ApiError::message("El DNI es requerido"));
        }
        if password.trim().is_empty() {
            return Err(ApiError::message("La contraseña es requerida"));
        }
        if dni.len() != 8 {
            return Err(ApiError::message("El DNI debe tener exactamente 8 dígitos"));
        }
        if !dni.chars().all(|c| c.is_ascii_digit()) {
            return Err(ApiError::message("El DNI solo debe contener números"));
        }

        let envelope = self.client.login(dni, password).await?;
        if envelope.header.code != CODE_OK {
            // HTTP succeeded but the application-level code did not
            return Err(ApiError::message(envelope.header.message));
        }

        let token = envelope.body.token;
        let claims = decode_claims(&token)
            .ok_or_else(|| ApiError::message("Error al procesar la respuesta del servidor"))?;

        self.session
            .save_session(&token, &claims.sub, &claims.dni, &claims.name)
            .map_err(ApiError::internal)?;

        tracing::info!("Logged in as user {}", claims.sub);
        Ok(User {
            id: claims.sub,
            dni: claims.dni,
            name: claims.name,
            token,
        })
    }

    /// Drops the session and every cached read, then announces the logout.
    /// Always succeeds; no network call is involved.
    pub fn logout(&self) {
        if let Err(err) = self.session.clear() {
            tracing::warn!("Failed to clear session store on logout: {:#}", err);
        }
        self.cache.clear_all();
        self.events.publish_logged_out();
        tracing::info!("Logged out");
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Strict all-or-nothing read: any single missing field means there is
    /// no current user, even if the other three are present.
    pub fn current_user(&self) -> Option<User> {
        let token = self.session.token()?;
        let id = self.session.user_id()?;
        let dni = self.session.user_dni()?;
        let name = self.session.user_name()?;
        Some(User {
            id,
            dni,
            name,
            token,
        })
    }

    #[tracing::instrument(skip_all)]
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ApiResult<String> {
        if current_password.trim().is_empty() {
            return Err(ApiError::message("La contraseña actual es requerida"));
        }
        if new_password.trim().is_empty() {
            return Err(ApiError::message("La nueva contraseña es requerida"));
        }
        if new_password.len() < 6 {
            return Err(ApiError::message(
                "La nueva contraseña debe tener al menos 6 caracteres",
            ));
        }
        if current_password == new_password {
            return Err(ApiError::message(
                "La nueva contraseña debe ser diferente a la actual",
            ));
        }

        let token = self.session.token().ok_or_else(ApiError::not_authenticated)?;

        let envelope = self
            .client
            .change_password(&token, current_password, new_password)
            .await?;
        if envelope.header.code == CODE_OK && envelope.body.success {
            Ok(envelope.body.message)
        } else {
            Err(ApiError::message(envelope.body.message))
        }
    }
}
