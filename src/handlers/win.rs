use crate::entities::WinStatus;
use crate::models::*;
use crate::services::GiftService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/wins",
    tag = "wins",
    request_body = ReserveGiftRequest,
    responses(
        (status = 200, description = "预留成功，返回 pending 中奖记录", body = WinResponse),
        (status = 404, description = "礼品不存在"),
        (status = 409, description = "库存耗尽")
    )
)]
/// 为中奖用户预留选中的礼品:
/// 1. 原子扣减库存（并发抢最后一件只有一个成功）
/// 2. 同一事务写入 pending 中奖记录
pub async fn reserve_gift(
    service: web::Data<GiftService>,
    body: web::Json<ReserveGiftRequest>,
) -> Result<HttpResponse> {
    match service.reserve(body.into_inner()).await {
        Ok(win) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": win }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wins/{id}/fulfill",
    tag = "wins",
    params(
        ("id" = i64, Path, description = "中奖记录ID")
    ),
    responses(
        (status = 200, description = "发放成功", body = WinResponse),
        (status = 404, description = "记录不存在"),
        (status = 409, description = "重复确认（已发放过）")
    )
)]
/// 发放端确认送达后标记 pending -> fulfilled
/// 重复确认返回 409，不会改写首次发放时间
pub async fn fulfill_win(
    service: web::Data<GiftService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.fulfill(path.into_inner()).await {
        Ok(win) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": win }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/wins",
    tag = "wins",
    params(
        ("telegram_id" = Option<i64>, Query, description = "按用户过滤"),
        ("status" = Option<WinStatus>, Query, description = "按状态过滤 (pending/fulfilled)"),
        ("page" = Option<i64>, Query, description = "页码 (默认1)"),
        ("page_size" = Option<i64>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取中奖记录成功", body = PaginatedResponse<WinResponse>)
    )
)]
/// 中奖台账查询（倒序分页）
/// 发放端用 `telegram_id + status=pending` 找到待发放记录
pub async fn list_wins(
    service: web::Data<GiftService>,
    query: web::Query<WinQuery>,
) -> Result<HttpResponse> {
    match service.list_wins(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn win_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wins")
            .route("", web::post().to(reserve_gift))
            .route("", web::get().to(list_wins))
            .route("/{id}/fulfill", web::post().to(fulfill_win)),
    );
}
