use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use elevator_config::{AppConfig, ConfigValidator};
use elevator_sim::{shutdown_channel, Application};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let matches = Command::new("elevator-sim")
        .version("1.0.0")
        .about("电梯群控调度模拟系统")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径"),
        )
        .arg(
            Arg::new("elevators")
                .short('e')
                .long("elevators")
                .value_name("COUNT")
                .help("电梯数量")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("requests")
                .short('r')
                .long("requests")
                .value_name("COUNT")
                .help("模拟请求数量")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("随机种子，指定后模拟结果可复现")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式")
                .value_parser(["json", "pretty", "text"]),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(String::as_str);

    // 加载配置
    let mut config = AppConfig::load(config_path).context("加载配置失败")?;
    apply_overrides(&mut config, &matches);
    config.validate().context("命令行参数校验失败")?;

    // 初始化日志系统
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    )?;

    info!("启动电梯群控调度模拟系统");
    if let Some(path) = config_path {
        info!("配置文件: {path}");
    }
    info!(
        "电梯数量: {}, 楼层范围: {}..={} (共 {} 层), 请求数量: {}",
        config.elevator.count,
        config.building.min_floor,
        config.building.max_floor,
        config.building.floor_count(),
        config.simulation.request_count
    );

    // 创建应用实例
    let app = Application::new(config).await?;

    let (trigger, listener) = shutdown_channel();
    let signal_handle = tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("收到关闭信号，开始优雅关闭...");
        trigger.trigger();
    });

    let result = app.run(listener).await;
    signal_handle.abort();

    match result {
        Ok(summary) => {
            if summary.interrupted {
                warn!("模拟被外部信号中断");
            }
            info!("电梯群控调度模拟系统已退出");
            Ok(())
        }
        Err(e) => {
            error!("模拟运行失败: {e:#}");
            Err(e)
        }
    }
}

/// 用命令行参数覆盖配置
fn apply_overrides(config: &mut AppConfig, matches: &ArgMatches) {
    if let Some(count) = matches.get_one::<usize>("elevators") {
        config.elevator.count = *count;
    }
    if let Some(count) = matches.get_one::<usize>("requests") {
        config.simulation.request_count = *count;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.simulation.seed = Some(*seed);
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.observability.log_level = level.clone();
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.observability.log_format = format.clone();
    }
}

/// 初始化日志系统
fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("初始化JSON日志格式失败")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("初始化Pretty日志格式失败")?;
        }
        "text" => {
            registry
                .with(tracing_subscriber::fmt::layer().compact())
                .try_init()
                .context("初始化Text日志格式失败")?;
        }
        _ => {
            return Err(anyhow::anyhow!("不支持的日志格式: {log_format}"));
        }
    }

    Ok(())
}

/// 等待关闭信号
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("安装Ctrl+C信号处理器失败: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("安装SIGTERM信号处理器失败: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("收到Ctrl+C信号");
        },
        _ = terminate => {
            info!("收到SIGTERM信号");
        },
    }
}
