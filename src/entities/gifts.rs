use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 稀有度等级（变体顺序即排序顺序：common < rare < epic < legendary）
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "gift_rarity")]
#[serde(rename_all = "snake_case")]
pub enum GiftRarity {
    #[sea_orm(string_value = "common")]
    Common,
    #[sea_orm(string_value = "rare")]
    Rare,
    #[sea_orm(string_value = "epic")]
    Epic,
    #[sea_orm(string_value = "legendary")]
    Legendary,
}

impl std::fmt::Display for GiftRarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GiftRarity::Common => write!(f, "common"),
            GiftRarity::Rare => write!(f, "rare"),
            GiftRarity::Epic => write!(f, "epic"),
            GiftRarity::Legendary => write!(f, "legendary"),
        }
    }
}

/// 礼品目录实体
/// 概念说明:
/// - quantity: 剩余库存，永不为负（扣减只走条件 UPDATE）
/// - is_available: 软下架开关；下架不删行，历史中奖记录仍然指向它
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gifts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 展示用图标
    pub emoji: String,
    /// 礼品名称（允许重名：同名不同批次）
    pub name: String,
    pub rarity: GiftRarity,
    pub quantity: i64,
    pub is_available: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering_follows_tiers() {
        assert!(GiftRarity::Common < GiftRarity::Rare);
        assert!(GiftRarity::Rare < GiftRarity::Epic);
        assert!(GiftRarity::Epic < GiftRarity::Legendary);
    }
}
