use crate::entities::{WinStatus, gift_entity as gifts, win_entity as wins};
use crate::error::{AppError, AppResult};
use crate::models::{
    AddGiftRequest, GiftAdminResponse, GiftResponse, PaginatedResponse, PaginationParams,
    ReserveGiftRequest, WinPageResponse, WinQuery, WinResponse,
};
use crate::services::user_service;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, UpdateResult,
};

#[derive(Clone)]
pub struct GiftService {
    pool: DatabaseConnection,
}

impl GiftService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 可领取目录：上架且有库存，稀有度升序、同稀有度按名称
    pub async fn list_available(&self) -> AppResult<Vec<GiftResponse>> {
        let mut list = gifts::Entity::find()
            .filter(gifts::Column::IsAvailable.eq(true))
            .filter(gifts::Column::Quantity.gt(0))
            .all(&self.pool)
            .await?;
        sort_catalog(&mut list);
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 新增礼品（管理端）。同名允许（不同批次），负库存拒绝
    pub async fn add_gift(&self, req: AddGiftRequest) -> AppResult<GiftAdminResponse> {
        validate_new_gift(&req)?;

        let model = gifts::ActiveModel {
            emoji: Set(req.emoji),
            name: Set(req.name),
            rarity: Set(req.rarity),
            quantity: Set(req.quantity),
            is_available: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Gift '{}' added with quantity {}", model.name, model.quantity);
        Ok(model.into())
    }

    /// 上下架（软开关，不删行）
    pub async fn set_availability(
        &self,
        gift_id: i64,
        is_available: bool,
    ) -> AppResult<GiftAdminResponse> {
        let gift = gifts::Entity::find_by_id(gift_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gift {gift_id} not found")))?;

        let mut am = gift.into_active_model();
        am.is_available = Set(is_available);
        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 预留礼品 (Reserve)
    ///
    /// 逻辑:
    /// 1. 事务内确保用户存在
    /// 2. 条件扣减库存 (update where quantity > 0)，命中行数为 0 则无任何变更
    /// 3. 写入 pending 中奖记录
    /// 4. 扣减与记录同一事务提交，不存在"扣了库存没有记录"的中间态
    pub async fn reserve(&self, req: ReserveGiftRequest) -> AppResult<WinResponse> {
        let txn = self.pool.begin().await?;

        let user = user_service::upsert_by_telegram_id(
            &txn,
            req.telegram_id,
            req.username.as_deref(),
            req.first_name.as_deref(),
        )
        .await?;

        // 原子扣减: 两个并发请求抢最后一件时只有一个会命中
        let update_result: UpdateResult = gifts::Entity::update_many()
            .col_expr(
                gifts::Column::Quantity,
                Expr::col(gifts::Column::Quantity).sub(1),
            )
            .filter(gifts::Column::Id.eq(req.gift_id))
            .filter(gifts::Column::Quantity.gt(0))
            .exec(&txn)
            .await?;

        if update_result.rows_affected == 0 {
            // 未命中：礼品不存在或库存耗尽，事务随 drop 回滚
            let gift = gifts::Entity::find_by_id(req.gift_id).one(&txn).await?;
            return Err(reserve_failure(gift, req.gift_id));
        }

        let win = wins::ActiveModel {
            user_id: Set(user.id),
            gift_id: Set(req.gift_id),
            telegram_id: Set(req.telegram_id),
            status: Set(WinStatus::Pending),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "User {} reserved gift {} (win {})",
            req.telegram_id,
            req.gift_id,
            win.id
        );
        Ok(win.into())
    }

    /// 发放 (Fulfill): pending -> fulfilled
    ///
    /// 状态条件更新保证重复确认不会改写 fulfilled_at，
    /// 且重复确认以 AlreadyFulfilled 显式上报而不是静默成功。
    /// 库存在预留时已扣，这里无库存副作用。
    pub async fn fulfill(&self, win_id: i64) -> AppResult<WinResponse> {
        let update_result: UpdateResult = wins::Entity::update_many()
            .col_expr(wins::Column::Status, Expr::value(WinStatus::Fulfilled))
            .col_expr(wins::Column::FulfilledAt, Expr::value(Utc::now()))
            .filter(wins::Column::Id.eq(win_id))
            .filter(wins::Column::Status.eq(WinStatus::Pending))
            .exec(&self.pool)
            .await?;

        if update_result.rows_affected == 0 {
            let win = wins::Entity::find_by_id(win_id).one(&self.pool).await?;
            return Err(fulfill_failure(win, win_id));
        }

        let win = wins::Entity::find_by_id(win_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Win disappeared after successful update".to_string())
            })?;

        log::info!("Win {} fulfilled for user {}", win.id, win.telegram_id);
        Ok(win.into())
    }

    /// 中奖记录查询（新→旧，分页）
    pub async fn list_wins(&self, query: &WinQuery) -> AppResult<WinPageResponse> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut find = wins::Entity::find();
        if let Some(telegram_id) = query.telegram_id {
            find = find.filter(wins::Column::TelegramId.eq(telegram_id));
        }
        if let Some(status) = query.status {
            find = find.filter(wins::Column::Status.eq(status));
        }

        let total = find.clone().count(&self.pool).await? as i64;

        let items = find
            .order_by(wins::Column::WonAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }
}

/// 入库校验：校验在任何数据库访问之前执行，失败时不会产生任何写入
fn validate_new_gift(req: &AddGiftRequest) -> AppResult<()> {
    if req.quantity < 0 {
        return Err(AppError::ValidationError(
            "Gift quantity must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// 目录排序: 稀有度升序，同稀有度按名称
fn sort_catalog(list: &mut [gifts::Model]) {
    list.sort_by(|a, b| a.rarity.cmp(&b.rarity).then_with(|| a.name.cmp(&b.name)));
}

/// 扣减未命中任何行时区分"礼品不存在"与"库存耗尽"
fn reserve_failure(gift: Option<gifts::Model>, gift_id: i64) -> AppError {
    match gift {
        None => AppError::NotFound(format!("Gift {gift_id} not found")),
        Some(g) => AppError::OutOfStock(format!("Gift '{}' is out of stock", g.name)),
    }
}

/// 状态条件更新未命中任何行时区分"记录不存在"与"重复确认"
fn fulfill_failure(win: Option<wins::Model>, win_id: i64) -> AppError {
    match win {
        None => AppError::NotFound(format!("Win {win_id} not found")),
        Some(_) => AppError::AlreadyFulfilled(format!("Win {win_id} was already fulfilled")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GiftRarity;

    fn gift(id: i64, name: &str, rarity: GiftRarity, quantity: i64) -> gifts::Model {
        gifts::Model {
            id,
            emoji: "🎁".to_string(),
            name: name.to_string(),
            rarity,
            quantity,
            is_available: true,
            created_at: None,
        }
    }

    #[test]
    fn test_sort_catalog_rarity_ascending_then_name() {
        let mut list = vec![
            gift(1, "Legendary Gift", GiftRarity::Legendary, 1),
            gift(2, "Epic Gift", GiftRarity::Epic, 3),
            gift(3, "Rare Gift", GiftRarity::Rare, 5),
            gift(4, "Common Gift", GiftRarity::Common, 10),
            gift(5, "Another Common Gift", GiftRarity::Common, 2),
        ];
        sort_catalog(&mut list);

        let names: Vec<&str> = list.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Another Common Gift",
                "Common Gift",
                "Rare Gift",
                "Epic Gift",
                "Legendary Gift",
            ]
        );
    }

    #[test]
    fn test_validate_new_gift_rejects_negative_quantity() {
        let req = AddGiftRequest {
            emoji: "💎".to_string(),
            name: "X".to_string(),
            rarity: GiftRarity::Common,
            quantity: -1,
        };
        assert!(matches!(
            validate_new_gift(&req),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_new_gift_allows_zero_quantity() {
        let req = AddGiftRequest {
            emoji: "🎀".to_string(),
            name: "Common Gift".to_string(),
            rarity: GiftRarity::Common,
            quantity: 0,
        };
        assert!(validate_new_gift(&req).is_ok());
    }

    #[test]
    fn test_reserve_failure_unknown_gift_is_not_found() {
        let err = reserve_failure(None, 99);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_reserve_failure_depleted_gift_is_out_of_stock() {
        let depleted = gift(1, "Legendary Gift", GiftRarity::Legendary, 0);
        let err = reserve_failure(Some(depleted), 1);
        assert!(matches!(err, AppError::OutOfStock(_)));
    }

    #[test]
    fn test_fulfill_failure_unknown_win_is_not_found() {
        let err = fulfill_failure(None, 7);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_fulfill_failure_done_win_is_already_fulfilled() {
        let done = wins::Model {
            id: 7,
            user_id: 1,
            gift_id: 1,
            telegram_id: 1000,
            status: WinStatus::Fulfilled,
            won_at: None,
            fulfilled_at: None,
        };
        let err = fulfill_failure(Some(done), 7);
        assert!(matches!(err, AppError::AlreadyFulfilled(_)));
    }
}
