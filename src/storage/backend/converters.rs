//! Conversions between sea-orm entity models and domain types.

use sea_orm::ActiveValue::Set;

use crate::errors::{PageSpyError, Result};
use crate::storage::models::{AdminAccount, Lure, LureContent, LureView};
use migration::entities::{admin, lure, lure_view};

pub fn lure_model_to_domain(model: lure::Model) -> Result<Lure> {
    let content = match model.kind.as_str() {
        "TEXT" => LureContent::Text(model.text_content.unwrap_or_default()),
        "IMAGE" => LureContent::Image(model.image_content.unwrap_or_default()),
        other => {
            return Err(PageSpyError::serialization(format!(
                "Lure '{}' has unknown kind '{}'",
                model.id, other
            )));
        }
    };

    Ok(Lure {
        id: model.id,
        path: model.path,
        content,
        created_at: model.created_at,
    })
}

pub fn lure_to_active_model(lure: &Lure) -> lure::ActiveModel {
    lure::ActiveModel {
        id: Set(lure.id.clone()),
        path: Set(lure.path.clone()),
        kind: Set(lure.content.kind().to_string()),
        text_content: Set(lure.content.text().map(String::from)),
        image_content: Set(lure.content.image().map(String::from)),
        created_at: Set(lure.created_at),
    }
}

pub fn view_model_to_domain(model: lure_view::Model) -> LureView {
    LureView {
        id: model.id,
        lure_id: model.lure_id,
        ip: model.ip,
        user_agent: model.user_agent,
        location: model.location,
        photo: model.photo,
    }
}

pub fn view_to_active_model(view: &LureView) -> lure_view::ActiveModel {
    lure_view::ActiveModel {
        id: Set(view.id.clone()),
        lure_id: Set(view.lure_id.clone()),
        ip: Set(view.ip.clone()),
        user_agent: Set(view.user_agent.clone()),
        location: Set(view.location.clone()),
        photo: Set(view.photo.clone()),
    }
}

pub fn admin_model_to_domain(model: admin::Model) -> AdminAccount {
    AdminAccount {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password,
        updated_at: model.updated_at,
    }
}

pub fn admin_to_active_model(account: &AdminAccount) -> admin::ActiveModel {
    admin::ActiveModel {
        id: Set(account.id.clone()),
        name: Set(account.name.clone()),
        email: Set(account.email.clone()),
        password: Set(account.password_hash.clone()),
        updated_at: Set(account.updated_at),
    }
}
