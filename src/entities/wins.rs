use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 中奖记录状态，只有 pending -> fulfilled 一条迁移路径
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "win_status")]
#[serde(rename_all = "snake_case")]
pub enum WinStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "fulfilled")]
    Fulfilled,
}

impl std::fmt::Display for WinStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinStatus::Pending => write!(f, "pending"),
            WinStatus::Fulfilled => write!(f, "fulfilled"),
        }
    }
}

/// 中奖记录（台账）
/// 记录本身即库存扣减的凭证：预留时创建，发放时仅改状态与时间戳，从不删除。
/// telegram_id 为用户外部身份的冗余副本，发放端查询时免去联表。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "wins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub gift_id: i64,
    pub telegram_id: i64,
    pub status: WinStatus,
    pub won_at: Option<DateTime<Utc>>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
