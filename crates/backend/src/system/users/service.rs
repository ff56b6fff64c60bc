use anyhow::{Context, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use contracts::shared::list_state::{BulkReport, SelectionState};
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};

use super::repository;

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Создание пользователя администратором
pub async fn create(dto: CreateUserDto, created_by: Option<i64>) -> Result<i64> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        anyhow::bail!("Логин не может быть пустым");
    }
    if dto.password.len() < 6 {
        anyhow::bail!("Пароль должен быть не короче 6 символов");
    }
    if repository::get_by_username(&username).await?.is_some() {
        anyhow::bail!("Логин уже занят: {}", username);
    }

    let now = Utc::now().to_rfc3339();
    let user = User {
        id: 0, // присвоит БД
        username,
        email: dto.email.filter(|e| !e.trim().is_empty()),
        full_name: dto.full_name.filter(|n| !n.trim().is_empty()),
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by,
    };

    let password_hash = hash_password(&dto.password)?;
    repository::create_with_password(&user, &password_hash).await
}

/// Обновление пользователя администратором
pub async fn update(dto: UpdateUserDto, actor_id: i64) -> Result<()> {
    let mut user = repository::get_by_id(dto.id)
        .await?
        .context("Пользователь не найден")?;

    // Администратор не может заблокировать сам себя
    if dto.id == actor_id && !dto.is_active {
        anyhow::bail!("Нельзя заблокировать собственную учётную запись");
    }
    // Защита последнего активного администратора
    if user.is_admin
        && (!dto.is_admin || !dto.is_active)
        && repository::count_active_admins().await? <= 1
    {
        anyhow::bail!("Нельзя разжаловать последнего администратора");
    }

    user.email = dto.email.filter(|e| !e.trim().is_empty());
    user.full_name = dto.full_name.filter(|n| !n.trim().is_empty());
    user.is_active = dto.is_active;
    user.is_admin = dto.is_admin;
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await
}

/// Удаление пользователя
pub async fn delete(id: i64, actor_id: i64) -> Result<bool> {
    if id == actor_id {
        anyhow::bail!("Нельзя удалить собственную учётную запись");
    }
    if let Some(user) = repository::get_by_id(id).await? {
        if user.is_admin && repository::count_active_admins().await? <= 1 {
            anyhow::bail!("Нельзя удалить последнего администратора");
        }
    }
    repository::delete(id).await
}

pub async fn get_by_id(id: i64) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// Смена пароля: свой — со старым паролем, чужой — только администратором
pub async fn change_password(dto: ChangePasswordDto, actor_id: i64, actor_is_admin: bool) -> Result<()> {
    if dto.new_password.len() < 6 {
        anyhow::bail!("Пароль должен быть не короче 6 символов");
    }

    if dto.user_id == actor_id {
        let current_hash = repository::get_password_hash(dto.user_id)
            .await?
            .context("Пользователь не найден")?;
        let old = dto.old_password.as_deref().unwrap_or("");
        if !verify_password(old, &current_hash) {
            anyhow::bail!("Старый пароль не подходит");
        }
    } else if !actor_is_admin {
        anyhow::bail!("Чужой пароль меняет только администратор");
    }

    let hash = hash_password(&dto.new_password)?;
    repository::update_password(dto.user_id, &hash).await
}

/// Массовая блокировка/разблокировка.
///
/// Отказы политики — построчно: собственная учётная запись и последний
/// активный администратор остаются нетронутыми, остальные строки
/// обрабатываются.
pub async fn bulk_set_active(ids: Vec<i64>, active: bool, actor_id: i64) -> Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        if !active && id == actor_id {
            report.record_failure(id, "Нельзя заблокировать собственную учётную запись");
            continue;
        }
        let Some(mut user) = repository::get_by_id(id).await? else {
            report.record_failure(id, "Пользователь не найден");
            continue;
        };
        if !active && user.is_admin && repository::count_active_admins().await? <= 1 {
            report.record_failure(id, "Нельзя заблокировать последнего администратора");
            continue;
        }
        if user.is_active != active {
            user.is_active = active;
            user.updated_at = Utc::now().to_rfc3339();
            repository::update(&user).await?;
        }
        report.record_ok(id);
    }
    Ok(report)
}

/// При первом запуске создаём администратора по умолчанию
pub async fn ensure_admin_seed() -> Result<()> {
    if repository::count_users().await? > 0 {
        return Ok(());
    }
    let id = create(
        CreateUserDto {
            username: "admin".into(),
            password: "admin".into(),
            email: None,
            full_name: Some("Администратор".into()),
            is_admin: true,
        },
        None,
    )
    .await?;
    tracing::warn!(
        user_id = id,
        "Создан пользователь admin/admin — смените пароль после первого входа"
    );
    Ok(())
}
