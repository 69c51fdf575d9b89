//! Transactional fixture seeding for tests and local setup.
//!
//! Seeding touches every table, so it runs inside a single transaction: either
//! the whole fixture set becomes visible or none of it does.

use crate::models::checklist::{Checklist, ChecklistFields};
use crate::models::contact::{Contact, ContactFields};
use crate::models::moving_box::{MovingBox, MovingBoxFields};
use crate::models::user::{CreateUser, User};
use crate::repositories::owned_repo::insert_owned;
use crate::repositories::UserRepo;
use crate::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// An owned fixture points at a user index outside `Fixtures::users`.
    #[error("fixture owner index {0} is out of range")]
    UnknownOwner(usize),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Rows to insert. Owned rows reference their owner by index into `users`.
#[derive(Debug, Default)]
pub struct Fixtures {
    pub users: Vec<CreateUser>,
    pub boxes: Vec<(usize, MovingBoxFields)>,
    pub contacts: Vec<(usize, ContactFields)>,
    pub lists: Vec<(usize, ChecklistFields)>,
}

/// Rows as stored, with generated ids, in fixture order.
#[derive(Debug)]
pub struct Seeded {
    pub users: Vec<User>,
    pub boxes: Vec<MovingBox>,
    pub contacts: Vec<Contact>,
    pub lists: Vec<Checklist>,
}

/// Insert all fixtures in one transaction.
pub async fn seed_fixtures(pool: &DbPool, fixtures: &Fixtures) -> Result<Seeded, SeedError> {
    let mut tx = pool.begin().await?;

    let mut users = Vec::with_capacity(fixtures.users.len());
    for input in &fixtures.users {
        users.push(UserRepo::create(&mut *tx, input).await?);
    }

    let owner = |index: usize| {
        users
            .get(index)
            .map(|u| u.id)
            .ok_or(SeedError::UnknownOwner(index))
    };

    let mut boxes = Vec::with_capacity(fixtures.boxes.len());
    for (index, input) in &fixtures.boxes {
        boxes.push(insert_owned::<MovingBox, _>(&mut *tx, owner(*index)?, input).await?);
    }

    let mut contacts = Vec::with_capacity(fixtures.contacts.len());
    for (index, input) in &fixtures.contacts {
        contacts.push(insert_owned::<Contact, _>(&mut *tx, owner(*index)?, input).await?);
    }

    let mut lists = Vec::with_capacity(fixtures.lists.len());
    for (index, input) in &fixtures.lists {
        lists.push(insert_owned::<Checklist, _>(&mut *tx, owner(*index)?, input).await?);
    }

    tx.commit().await?;

    tracing::debug!(
        users = users.len(),
        boxes = boxes.len(),
        contacts = contacts.len(),
        lists = lists.len(),
        "Fixtures seeded",
    );

    Ok(Seeded {
        users,
        boxes,
        contacts,
        lists,
    })
}
