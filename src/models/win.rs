use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{WinStatus, win_entity};

use super::PaginatedResponse;

/// 预留礼品请求（中奖者在 Mini App 选中礼品后由网关调用）
/// 网关负责同一次中奖不重复提交；本服务只保证单次调用原子
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReserveGiftRequest {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub gift_id: i64,
}

/// 中奖记录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinResponse {
    pub id: i64,
    pub gift_id: i64,
    pub telegram_id: i64,
    pub status: WinStatus,
    pub won_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

impl From<win_entity::Model> for WinResponse {
    fn from(m: win_entity::Model) -> Self {
        WinResponse {
            id: m.id,
            gift_id: m.gift_id,
            telegram_id: m.telegram_id,
            status: m.status,
            won_at: m.won_at.unwrap_or_else(Utc::now),
            fulfilled_at: m.fulfilled_at,
        }
    }
}

/// 中奖记录查询参数
/// 发放端用 `telegram_id + status=pending` 找到待发放记录
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct WinQuery {
    pub telegram_id: Option<i64>,
    pub status: Option<WinStatus>,
    /// 页码 (默认 1)
    pub page: Option<i64>,
    /// 每页数量 (默认 20)
    pub page_size: Option<i64>,
}

/// 中奖记录分页响应
pub type WinPageResponse = PaginatedResponse<WinResponse>;
