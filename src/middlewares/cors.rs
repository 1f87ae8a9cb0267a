use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // Mini App 从聊天客户端内嵌 WebView / 隧道域名访问，来源放开
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
        // ngrok 隧道调试需要携带自定义 Header，预检放行
        .allowed_headers(vec![
            "Content-Type",
            "Authorization",
            "X-Admin-Token",
            "ngrok-skip-browser-warning",
        ])
        .max_age(3600)
}
