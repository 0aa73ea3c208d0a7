use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::config::AdminConfig;
use crate::entity::{category, user};
use crate::utils::hash;

/// Default categories seeded on startup. These cannot be deleted.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Movies", "movies"),
    ("Music", "music"),
    ("Dramas", "dramas"),
    ("Cartoons", "cartoons"),
];

/// Seed the `category` table with the default rail.
pub async fn seed_default_categories(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for (i, &(name, slug)) in DEFAULT_CATEGORIES.iter().enumerate() {
        let model = category::ActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            order: Set(i as i32 + 1),
            is_default: Set(true),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let result = category::Entity::insert(model)
            .on_conflict(
                OnConflict::column(category::Column::Slug)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => inserted += 1,
            Ok(_) => {}
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} default categories", inserted);
    }

    Ok(())
}

/// Create the bootstrap owner account from configuration, unless an account
/// with that email already exists.
pub async fn seed_owner_account(
    db: &DatabaseConnection,
    admin: Option<&AdminConfig>,
) -> Result<(), DbErr> {
    let Some(admin) = admin else {
        info!("No admin credentials configured, skipping owner bootstrap");
        return Ok(());
    };

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(admin.email.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash::hash_password(&admin.password)
        .map_err(|e| DbErr::Custom(format!("Failed to hash owner password: {e}")))?;

    let model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        firstname: Set(admin.firstname.clone()),
        lastname: Set(admin.lastname.clone()),
        username: Set(admin.username.clone()),
        email: Set(admin.email.clone()),
        password: Set(password_hash),
        is_admin: Set(true),
        is_owner: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match user::Entity::insert(model)
        .on_conflict(
            OnConflict::column(user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
    {
        Ok(_) => {
            info!(username = %admin.username, "Seeded owner account");
            Ok(())
        }
        // A concurrent instance already bootstrapped the owner.
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}
