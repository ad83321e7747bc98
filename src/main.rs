use anyhow::Result;
use banco_questoes::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    // 初始化并运行应用
    let _exam = App::initialize(config).await?.run().await?;

    Ok(())
}
