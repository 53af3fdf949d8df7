//! 上传文件记录

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, ModelTrait, QueryOrder};

use super::SeaOrmStorage;
use super::converters::model_to_image;
use crate::errors::Result;
use crate::storage::ImageRecord;

use migration::entities::image;

impl SeaOrmStorage {
    pub async fn insert_image(
        &self,
        title: Option<String>,
        filename: &str,
        path: &str,
    ) -> Result<ImageRecord> {
        let model = image::ActiveModel {
            title: Set(title),
            filename: Set(filename.to_string()),
            path: Set(path.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(model_to_image(model))
    }

    pub async fn find_image(&self, id: i64) -> Result<Option<ImageRecord>> {
        let model = image::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_image))
    }

    /// 全部上传记录，新的在前
    pub async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let models = image::Entity::find()
            .order_by_desc(image::Column::CreatedAt)
            .order_by_desc(image::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_image).collect())
    }

    /// 删除记录并返回被删除的行
    pub async fn delete_image(&self, id: i64) -> Result<Option<ImageRecord>> {
        let Some(model) = image::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let record = model_to_image(model.clone());
        model.delete(&self.db).await?;
        Ok(Some(record))
    }
}
