use crate::models::*;
use crate::services::{GiftService, RollService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/gifts",
    tag = "admin",
    request_body = AddGiftRequest,
    security(
        ("admin_token" = [])
    ),
    responses(
        (status = 200, description = "新增礼品成功", body = GiftAdminResponse),
        (status = 400, description = "库存为负等非法输入"),
        (status = 401, description = "管理令牌缺失或错误")
    )
)]
/// 新增礼品目录条目（允许同名：同一礼品的不同批次）
pub async fn add_gift(
    service: web::Data<GiftService>,
    body: web::Json<AddGiftRequest>,
) -> Result<HttpResponse> {
    match service.add_gift(body.into_inner()).await {
        Ok(gift) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": gift }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/gifts/{id}/availability",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "礼品ID")
    ),
    request_body = SetAvailabilityRequest,
    security(
        ("admin_token" = [])
    ),
    responses(
        (status = 200, description = "上下架成功", body = GiftAdminResponse),
        (status = 401, description = "管理令牌缺失或错误"),
        (status = 404, description = "礼品不存在")
    )
)]
/// 上下架礼品（软开关；历史中奖记录不受影响）
pub async fn set_gift_availability(
    service: web::Data<GiftService>,
    path: web::Path<i64>,
    body: web::Json<SetAvailabilityRequest>,
) -> Result<HttpResponse> {
    match service
        .set_availability(path.into_inner(), body.is_available)
        .await
    {
        Ok(gift) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": gift }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    security(
        ("admin_token" = [])
    ),
    responses(
        (status = 200, description = "获取统计成功", body = StatsResponse),
        (status = 401, description = "管理令牌缺失或错误")
    )
)]
/// 掷骰与中奖计数统计
pub async fn get_stats(service: web::Data<RollService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": stats }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置（/admin 前缀整体由管理令牌中间件保护）
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/gifts", web::post().to(add_gift))
            .route("/gifts/{id}/availability", web::patch().to(set_gift_availability))
            .route("/stats", web::get().to(get_stats)),
    );
}
