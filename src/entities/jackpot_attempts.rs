use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 掷骰流水（统计用，只追加不修改）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "jackpot_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    /// 老虎机原始结果值 (1..=64)
    pub dice_value: i32,
    pub is_jackpot: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
