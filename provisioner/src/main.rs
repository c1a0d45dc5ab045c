//! 数据库账号初始化工具
//!
//! 由运维人员在每个环境中手动执行一次：
//! - 在 admin 库中创建用户管理员账号（已存在则跳过）
//! - 在应用库中创建仅限该库读写的应用账号（已存在则跳过）
//! - 列出应用库中的账号以供核对

mod directory;
mod provision;

use anyhow::Context;
use common::config::AppConfig;
use directory::MongoDirectory;
use provision::Provisioner;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "provision-users";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME).context("加载配置失败")?;
    info!(
        service = SERVICE_NAME,
        admin_db = %config.admin_database,
        app_db = %config.app_database,
        "开始初始化数据库账号"
    );

    let directory = MongoDirectory::connect(&config.mongo_uri)
        .await
        .context("创建 MongoDB 客户端失败")?;
    let report = Provisioner::new(directory).run(&config).await;

    println!("\n{}", report.render(&config));

    if !report.is_success() {
        anyhow::bail!("部分初始化步骤失败");
    }
    Ok(())
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let Ok(content) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            // Only set if not already set by the environment
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}
