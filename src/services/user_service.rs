use crate::entities::user_entity as users;
use crate::error::AppResult;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
};

/// 按 Telegram ID 建档（首次互动）或刷新昵称字段。
/// 泛化到 ConnectionTrait：预留流程在事务里调用，掷骰流程直接走连接池。
pub async fn upsert_by_telegram_id<C>(
    conn: &C,
    telegram_id: i64,
    username: Option<&str>,
    first_name: Option<&str>,
) -> AppResult<users::Model>
where
    C: ConnectionTrait,
{
    let existing = users::Entity::find()
        .filter(users::Column::TelegramId.eq(telegram_id))
        .one(conn)
        .await?;

    let Some(user) = existing else {
        let created = users::ActiveModel {
            telegram_id: Set(telegram_id),
            username: Set(username.map(str::to_string)),
            first_name: Set(first_name.map(str::to_string)),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        log::info!("New user registered: {telegram_id}");
        return Ok(created);
    };

    // 只有昵称有变化才写库
    let username_changed = username.is_some() && user.username.as_deref() != username;
    let first_name_changed = first_name.is_some() && user.first_name.as_deref() != first_name;
    if !username_changed && !first_name_changed {
        return Ok(user);
    }

    let mut am = user.into_active_model();
    if username_changed {
        am.username = Set(username.map(str::to_string));
    }
    if first_name_changed {
        am.first_name = Set(first_name.map(str::to_string));
    }
    let updated = am.update(conn).await?;
    Ok(updated)
}
