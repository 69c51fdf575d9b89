//! Single-request read of everything a user owns.

use movingday_core::error::CoreError;
use movingday_core::resource::OwnedResourceService;
use movingday_core::sanitize::{to_public_all, PublicShape};
use movingday_core::types::DbId;
use movingday_db::models::checklist::{Checklist, ChecklistResponse};
use movingday_db::models::contact::{Contact, ContactResponse};
use movingday_db::models::moving_box::{MovingBox, MovingBoxResponse};
use movingday_db::models::user::{User, UserResponse};
use movingday_db::repositories::UserRepo;
use movingday_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// A user's profile together with all of their owned rows.
#[derive(Debug)]
pub struct Overview {
    pub user: User,
    pub boxes: Vec<MovingBox>,
    pub contacts: Vec<Contact>,
    pub lists: Vec<Checklist>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub user: UserResponse,
    pub boxes: Vec<MovingBoxResponse>,
    pub contacts: Vec<ContactResponse>,
    pub lists: Vec<ChecklistResponse>,
}

impl PublicShape for Overview {
    type Public = OverviewResponse;

    fn to_public(&self) -> OverviewResponse {
        OverviewResponse {
            user: self.user.to_public(),
            boxes: to_public_all(&self.boxes),
            contacts: to_public_all(&self.contacts),
            lists: to_public_all(&self.lists),
        }
    }
}

#[derive(Clone)]
pub struct Aggregator {
    pub pool: DbPool,
    pub boxes: OwnedResourceService<MovingBox>,
    pub contacts: OwnedResourceService<Contact>,
    pub lists: OwnedResourceService<Checklist>,
}

impl Aggregator {
    /// Fetch the profile and the three collections concurrently. The first
    /// failure fails the whole read.
    pub async fn get_all(&self, user_id: DbId) -> AppResult<Overview> {
        let profile = async {
            UserRepo::find_by_id(&self.pool, user_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: user_id,
                }))
        };
        let boxes = async { self.boxes.list(user_id).await.map_err(AppError::from) };
        let contacts = async { self.contacts.list(user_id).await.map_err(AppError::from) };
        let lists = async { self.lists.list(user_id).await.map_err(AppError::from) };

        let (user, boxes, contacts, lists) = tokio::try_join!(profile, boxes, contacts, lists)?;

        Ok(Overview {
            user,
            boxes,
            contacts,
            lists,
        })
    }
}
