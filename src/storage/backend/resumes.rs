//! 简历记录的增删改查

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::model_to_resume;
use crate::errors::Result;
use crate::storage::Resume;

use migration::entities::resume;

impl SeaOrmStorage {
    pub async fn insert_resume(
        &self,
        unique_id: &str,
        name: &str,
        resume_data: serde_json::Value,
        user_id: Option<String>,
    ) -> Result<Resume> {
        let now = Utc::now();
        let model = resume::ActiveModel {
            unique_id: Set(unique_id.to_string()),
            name: Set(name.to_string()),
            resume_data: Set(resume_data),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        debug!("Resume inserted: {}", model.unique_id);
        Ok(model_to_resume(model))
    }

    pub async fn find_resume(&self, unique_id: &str) -> Result<Option<Resume>> {
        let model = resume::Entity::find()
            .filter(resume::Column::UniqueId.eq(unique_id))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_resume))
    }

    /// 某用户的简历，按创建时间倒序
    pub async fn list_resumes_by_user(&self, user_id: &str, limit: u64) -> Result<Vec<Resume>> {
        let models = resume::Entity::find()
            .filter(resume::Column::UserId.eq(user_id))
            .order_by_desc(resume::Column::CreatedAt)
            .order_by_desc(resume::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_resume).collect())
    }

    /// 更新调用者拥有的简历；不存在或不属于该用户时返回 None
    pub async fn update_resume(
        &self,
        unique_id: &str,
        user_id: &str,
        name: Option<String>,
        resume_data: Option<serde_json::Value>,
    ) -> Result<Option<Resume>> {
        let Some(model) = resume::Entity::find()
            .filter(resume::Column::UniqueId.eq(unique_id))
            .filter(resume::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(data) = resume_data {
            active.resume_data = Set(data);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(model_to_resume(model)))
    }

    /// 删除调用者拥有的简历，返回是否删除
    pub async fn delete_resume(&self, unique_id: &str, user_id: &str) -> Result<bool> {
        let result = resume::Entity::delete_many()
            .filter(resume::Column::UniqueId.eq(unique_id))
            .filter(resume::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
