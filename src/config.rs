use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// 管理端点令牌 (X-Admin-Token)，为空则拒绝一切管理请求
    pub token: String,
    /// 管理员 Telegram 数字ID（机器人侧命令鉴权用）
    #[serde(default)]
    pub telegram_id: Option<i64>,
}

impl AdminConfig {
    /// 所有管理操作共用的鉴权判定
    pub fn authorizes_token(&self, token: Option<&str>) -> bool {
        !self.token.is_empty() && token == Some(self.token.as_str())
    }

    pub fn is_admin(&self, telegram_id: i64) -> bool {
        self.telegram_id == Some(telegram_id)
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件：先解析再用环境变量覆盖
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                        connect_timeout_secs: get_env_parse("DB_CONNECT_TIMEOUT_SECS", 5u64),
                    },
                    admin: AdminConfig {
                        token: get_env("ADMIN_TOKEN").unwrap_or_default(),
                        telegram_id: get_env("ADMIN_TELEGRAM_ID").and_then(|v| v.parse().ok()),
                    },
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DB_CONNECT_TIMEOUT_SECS")
            && let Ok(t) = v.parse()
        {
            config.database.connect_timeout_secs = t;
        }
        if let Ok(v) = env::var("ADMIN_TOKEN") {
            config.admin.token = v;
        }
        if let Ok(v) = env::var("ADMIN_TELEGRAM_ID")
            && let Ok(id) = v.parse()
        {
            config.admin.telegram_id = Some(id);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_token_predicate() {
        let admin = AdminConfig {
            token: "secret".to_string(),
            telegram_id: Some(42),
        };
        assert!(admin.authorizes_token(Some("secret")));
        assert!(!admin.authorizes_token(Some("wrong")));
        assert!(!admin.authorizes_token(None));
        assert!(admin.is_admin(42));
        assert!(!admin.is_admin(7));
    }

    #[test]
    fn test_empty_token_rejects_everything() {
        let admin = AdminConfig::default();
        assert!(!admin.authorizes_token(Some("")));
        assert!(!admin.authorizes_token(None));
    }
}
