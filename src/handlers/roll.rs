use crate::models::*;
use crate::services::RollService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/rolls",
    tag = "rolls",
    request_body = RollRequest,
    responses(
        (status = 200, description = "掷骰判定成功", body = RollResponse),
        (status = 400, description = "结果值在老虎机值域之外")
    )
)]
/// 上报一次老虎机结果并返回判定:
/// 64 (即 777) 为 jackpot，值域内其它值为 miss，同时落一条掷骰流水
pub async fn record_roll(
    service: web::Data<RollService>,
    body: web::Json<RollRequest>,
) -> Result<HttpResponse> {
    match service.record_roll(body.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn roll_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/rolls").route("", web::post().to(record_roll)));
}
