use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 掷骰判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RollOutcome {
    Jackpot,
    Miss,
}

/// 掷骰上报请求（网关在聊天里收到老虎机结果后调用）
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RollRequest {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    /// 老虎机结果值 (1..=64，64 即 777)
    pub dice_value: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RollResponse {
    pub outcome: RollOutcome,
    pub dice_value: i32,
}

/// 管理端统计
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_attempts: i64,
    pub total_jackpots: i64,
    pub total_wins: i64,
    pub pending_wins: i64,
    pub fulfilled_wins: i64,
}
