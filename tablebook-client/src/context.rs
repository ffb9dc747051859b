//! Application context
//!
//! Bundles the process-wide pieces every view needs: configuration, the API
//! client binding and the session store. Views receive a clone instead of
//! reaching for globals.

use std::sync::Arc;

use crate::guard::RouteGuard;
use crate::http::RestaurantApi;
use crate::session::SessionStore;
use crate::storage::{FileStorage, SessionStorage};
use crate::{ClientConfig, ClientResult};

#[derive(Clone)]
pub struct AppContext {
    config: Arc<ClientConfig>,
    api: Arc<dyn RestaurantApi>,
    session: Arc<SessionStore>,
}

impl AppContext {
    /// Start-up wiring: network client, file storage, restored session
    pub fn bootstrap(config: ClientConfig) -> ClientResult<Self> {
        let api: Arc<dyn RestaurantApi> = Arc::new(config.build_http_client()?);
        let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(config.storage_dir.clone()));
        let ctx = Self::with_parts(config, api, storage);
        let state = ctx.session.restore();
        tracing::info!(?state, base_url = %ctx.config.base_url, "Client context ready");
        Ok(ctx)
    }

    /// Wire a context from explicit parts; the session starts anonymous
    pub fn with_parts(
        config: ClientConfig,
        api: Arc<dyn RestaurantApi>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(api.clone(), storage));
        Self {
            config: Arc::new(config),
            api,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<dyn RestaurantApi> {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn guard(&self) -> RouteGuard<'_> {
        RouteGuard::new(&self.session)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish()
    }
}
