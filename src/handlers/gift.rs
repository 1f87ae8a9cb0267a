use crate::models::*;
use crate::services::GiftService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/gifts",
    tag = "gifts",
    responses(
        (status = 200, description = "获取可领取礼品目录成功", body = [GiftResponse])
    )
)]
/// 当前可领取的礼品目录（Mini App 展示用）
/// 零库存与已下架的礼品不会出现在结果里
pub async fn list_gifts(service: web::Data<GiftService>) -> Result<HttpResponse> {
    match service.list_available().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn gift_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/gifts").route("", web::get().to(list_gifts)));
}
