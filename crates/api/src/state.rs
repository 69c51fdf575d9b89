use std::sync::Arc;

use movingday_core::resource::OwnedResourceService;
use movingday_db::models::checklist::Checklist;
use movingday_db::models::contact::Contact;
use movingday_db::models::moving_box::MovingBox;
use movingday_db::repositories::PgOwnedStore;
use movingday_db::DbPool;

use crate::aggregate::Aggregator;
use crate::auth::jwt::TokenService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer token issuance and resolution.
    pub tokens: Arc<TokenService>,
    pub boxes: OwnedResourceService<MovingBox>,
    pub contacts: OwnedResourceService<Contact>,
    pub lists: OwnedResourceService<Checklist>,
}

impl AppState {
    /// Wire every service against `pool`. Nothing is read from the environment here.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        let box_store = Arc::new(PgOwnedStore::<MovingBox>::new(pool.clone()));
        let contact_store = Arc::new(PgOwnedStore::<Contact>::new(pool.clone()));
        let list_store = Arc::new(PgOwnedStore::<Checklist>::new(pool.clone()));

        Self {
            boxes: OwnedResourceService::<MovingBox>::new(box_store),
            contacts: OwnedResourceService::<Contact>::new(contact_store),
            lists: OwnedResourceService::<Checklist>::new(list_store),
            pool,
            config: Arc::new(config),
            tokens,
        }
    }

    /// Aggregate reader over the same pool and services.
    pub fn aggregator(&self) -> Aggregator {
        Aggregator {
            pool: self.pool.clone(),
            boxes: self.boxes.clone(),
            contacts: self.contacts.clone(),
            lists: self.lists.clone(),
        }
    }
}
