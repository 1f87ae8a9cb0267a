use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{GiftRarity, gift_entity};

/// 目录条目（Mini App 展示用，只含对外字段）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GiftResponse {
    pub id: i64,
    pub emoji: String,
    pub name: String,
    pub rarity: GiftRarity,
    pub quantity: i64,
}

impl From<gift_entity::Model> for GiftResponse {
    fn from(m: gift_entity::Model) -> Self {
        GiftResponse {
            id: m.id,
            emoji: m.emoji,
            name: m.name,
            rarity: m.rarity,
            quantity: m.quantity,
        }
    }
}

/// 管理端视图（含下架状态）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GiftAdminResponse {
    pub id: i64,
    pub emoji: String,
    pub name: String,
    pub rarity: GiftRarity,
    pub quantity: i64,
    pub is_available: bool,
}

impl From<gift_entity::Model> for GiftAdminResponse {
    fn from(m: gift_entity::Model) -> Self {
        GiftAdminResponse {
            id: m.id,
            emoji: m.emoji,
            name: m.name,
            rarity: m.rarity,
            quantity: m.quantity,
            is_available: m.is_available,
        }
    }
}

/// 新增礼品请求（管理端）
/// quantity 允许为 0（先建条目后补库存），为负则拒绝
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddGiftRequest {
    pub emoji: String,
    pub name: String,
    pub rarity: GiftRarity,
    pub quantity: i64,
}

/// 上下架请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetAvailabilityRequest {
    pub is_available: bool,
}
