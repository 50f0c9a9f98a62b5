use scpl_config::SeedConfig;
use scpl_core::roles::Role;
use scpl_db::Stores;
use scpl_models::{NewUser, User, normalize_email};

use super::SeedError;

/// Creates the configured admin (`ADMIN` + `EDITOR`) unless a user with
/// that email already exists. Returns whether a user was inserted.
pub async fn seed_admin(
    stores: &Stores,
    config: &SeedConfig,
    hash_cost: u32,
) -> Result<bool, SeedError> {
    let email = normalize_email(&config.admin_email);
    if stores.users.find_by_email(&email).await?.is_some() {
        tracing::debug!(%email, "Admin user already present");
        return Ok(false);
    }

    let user = create_user(
        stores,
        &config.admin_name,
        &email,
        &config.admin_password,
        vec![Role::Admin, Role::Editor],
        hash_cost,
    )
    .await?;
    tracing::info!(user_id = %user.id, email = %user.email, "Seeded admin user");

    Ok(true)
}

/// Hashes the password and inserts a new user.
///
/// # Errors
///
/// [`scpl_db::StoreError::Conflict`] when the email is taken.
pub async fn create_user(
    stores: &Stores,
    name: &str,
    email: &str,
    password: &str,
    roles: Vec<Role>,
    hash_cost: u32,
) -> Result<User, SeedError> {
    let password_hash = bcrypt::hash(password, hash_cost)?;
    let user = stores
        .users
        .create(NewUser::new(name, email, password_hash, roles))
        .await?;
    Ok(user)
}
