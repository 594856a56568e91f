use crate::database::entities::{CategoryRecord, dictionary};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Dictionary (category label) DAO
#[derive(Clone)]
pub struct DictionaryDao {
    db: DatabaseConnection,
}

impl DictionaryDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> DatabaseResult<Vec<CategoryRecord>> {
        let categories = dictionary::Entity::find()
            .order_by_asc(dictionary::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(categories)
    }

    /// First category carrying the given name
    pub async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<CategoryRecord>> {
        let category = dictionary::Entity::find()
            .filter(dictionary::Column::Name.eq(name))
            .order_by_asc(dictionary::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(category)
    }

    pub async fn create(&self, name: &str) -> DatabaseResult<i32> {
        let active_model = dictionary::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(name.to_string()),
        };

        let inserted = active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(inserted.id)
    }
}
