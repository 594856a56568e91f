use crate::database::entities::{UserRecord, users};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, Set};

/// Users DAO for database operations
#[derive(Clone)]
pub struct UsersDao {
    db: DatabaseConnection,
}

impl UsersDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: i32) -> DatabaseResult<Option<UserRecord>> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Insert a user, returning the assigned ID
    pub async fn create(&self, user: &UserRecord) -> DatabaseResult<i32> {
        let active_model = users::ActiveModel {
            id: ActiveValue::NotSet,
            login: Set(user.login.clone()),
            registration_date: Set(user.registration_date),
        };

        let inserted = active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(inserted.id)
    }
}
