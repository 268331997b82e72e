use anyhow::Result;
use blackboard_client::error::{AppError, ConfigError};
use blackboard_client::orchestrator::App;
use blackboard_client::utils::logging;
use blackboard_client::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 目标作业
    let assignment_id = std::env::var("ASSIGNMENT_ID").map_err(|_| {
        AppError::Config(ConfigError::EnvVarNotFound {
            var_name: "ASSIGNMENT_ID".to_string(),
        })
    })?;

    // 初始化并运行应用
    App::initialize(config)?.run(&assignment_id).await?;

    Ok(())
}
