use crate::entities::{WinStatus, jackpot_attempt_entity as attempts, win_entity as wins};
use crate::error::{AppError, AppResult};
use crate::models::{RollOutcome, RollRequest, RollResponse, StatsResponse};
use crate::services::user_service;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

/// 老虎机结果值域 (聊天客户端的 slot machine: 1..=64)
pub const DICE_MIN: i32 = 1;
pub const DICE_MAX: i32 = 64;
/// 三个 7 对应的组合值
pub const JACKPOT_VALUE: i32 = 64;

#[derive(Clone)]
pub struct RollService {
    pool: DatabaseConnection,
}

impl RollService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 纯判定：64 -> Jackpot，值域内其它值 -> Miss。
    /// 值域外是调用方编程错误，直接报错而不是静默按 Miss 处理
    pub fn evaluate(dice_value: i32) -> AppResult<RollOutcome> {
        if !(DICE_MIN..=DICE_MAX).contains(&dice_value) {
            return Err(AppError::ValidationError(format!(
                "Dice value {dice_value} outside slot machine range {DICE_MIN}..={DICE_MAX}"
            )));
        }
        Ok(if dice_value == JACKPOT_VALUE {
            RollOutcome::Jackpot
        } else {
            RollOutcome::Miss
        })
    }

    /// 记录一次掷骰并返回判定结果
    pub async fn record_roll(&self, req: RollRequest) -> AppResult<RollResponse> {
        let outcome = Self::evaluate(req.dice_value)?;

        let user = user_service::upsert_by_telegram_id(
            &self.pool,
            req.telegram_id,
            req.username.as_deref(),
            req.first_name.as_deref(),
        )
        .await?;

        attempts::ActiveModel {
            user_id: Set(user.id),
            dice_value: Set(req.dice_value),
            is_jackpot: Set(outcome == RollOutcome::Jackpot),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        if outcome == RollOutcome::Jackpot {
            log::info!("User {} rolled 777", req.telegram_id);
        }

        Ok(RollResponse {
            outcome,
            dice_value: req.dice_value,
        })
    }

    /// 管理端统计：掷骰与中奖计数
    pub async fn stats(&self) -> AppResult<StatsResponse> {
        let total_attempts = attempts::Entity::find().count(&self.pool).await? as i64;
        let total_jackpots = attempts::Entity::find()
            .filter(attempts::Column::IsJackpot.eq(true))
            .count(&self.pool)
            .await? as i64;
        let total_wins = wins::Entity::find().count(&self.pool).await? as i64;
        let pending_wins = wins::Entity::find()
            .filter(wins::Column::Status.eq(WinStatus::Pending))
            .count(&self.pool)
            .await? as i64;
        let fulfilled_wins = total_wins - pending_wins;

        Ok(StatsResponse {
            total_attempts,
            total_jackpots,
            total_wins,
            pending_wins,
            fulfilled_wins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_jackpot_value() {
        assert_eq!(RollService::evaluate(64).unwrap(), RollOutcome::Jackpot);
    }

    #[test]
    fn test_evaluate_every_other_value_is_miss() {
        for value in DICE_MIN..JACKPOT_VALUE {
            assert_eq!(RollService::evaluate(value).unwrap(), RollOutcome::Miss);
        }
    }

    #[test]
    fn test_evaluate_rejects_out_of_domain_values() {
        assert!(matches!(
            RollService::evaluate(0),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            RollService::evaluate(65),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            RollService::evaluate(-1),
            Err(AppError::ValidationError(_))
        ));
    }
}
