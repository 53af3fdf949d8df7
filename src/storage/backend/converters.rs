use crate::analytics::{NewView, ViewEvent};
use crate::storage::{ImageRecord, Resume};
use migration::entities::{image, resume, view};

/// 将 view Model 转换为 ViewEvent
pub fn model_to_view_event(model: view::Model) -> ViewEvent {
    ViewEvent {
        id: model.id,
        resume_id: model.resume_id,
        unique_id: model.unique_id,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        browser_name: model.browser_name,
        browser_version: model.browser_version,
        device_type: model.device_type,
        operating_system: model.operating_system,
        referrer_url: model.referrer_url,
        view_duration: model.view_duration,
        is_unique_view: model.is_unique_view,
        session_id: model.session_id,
        timestamp: model.timestamp,
    }
}

/// 将 NewView 转换为 ActiveModel（id 由数据库生成）
pub fn new_view_to_active_model(view: NewView) -> view::ActiveModel {
    use sea_orm::ActiveValue::*;

    view::ActiveModel {
        id: NotSet,
        resume_id: Set(view.resume_id),
        unique_id: Set(view.unique_id),
        ip_address: Set(view.ip_address),
        user_agent: Set(view.user_agent),
        browser_name: Set(view.browser_name),
        browser_version: Set(view.browser_version),
        device_type: Set(view.device_type),
        operating_system: Set(view.operating_system),
        referrer_url: Set(view.referrer_url),
        view_duration: Set(view.view_duration),
        is_unique_view: Set(view.is_unique_view),
        session_id: Set(view.session_id),
        timestamp: Set(view.timestamp),
    }
}

pub fn model_to_resume(model: resume::Model) -> Resume {
    Resume {
        id: model.id,
        unique_id: model.unique_id,
        name: model.name,
        resume_data: model.resume_data,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_image(model: image::Model) -> ImageRecord {
    ImageRecord {
        id: model.id,
        title: model.title,
        filename: model.filename,
        path: model.path,
        created_at: model.created_at,
    }
}
