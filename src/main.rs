//! ACSAMS 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 저장소(MongoDB + Redis 또는 메모리)를 연결하고 JWT 인증 기반의 REST API를 제공합니다.
//!
//! ```bash
//! acsams                                        # serve (기본값)
//! acsams seed --file sample/ACAMS.user.json     # 시드 사용자 가져오기
//! ```

use std::path::{Path, PathBuf};

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use acsams::caching::redis::RedisClient;
use acsams::config::{AppConfig, ServerConfig, StorageBackend, StorageConfig};
use acsams::core::errors::{AppError, AppResult, ErrorContext};
use acsams::core::state::AppState;
use acsams::db::Database;
use acsams::repositories::Repositories;
use acsams::routes::configure_all_routes;
use acsams::services::users::read_seed_file;
use acsams::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_seed_report, print_step_complete,
    print_step_start, print_sub_task,
};

/// 명령행 인자
#[derive(Debug, Parser)]
#[command(name = "acsams", version, about = "Cloud service access management system")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// HTTP 서버 실행 (기본값)
    Serve,
    /// 시드 파일의 사용자를 users 컬렉션으로 가져오기
    Seed {
        #[arg(long, default_value = "sample/ACAMS.user.json")]
        file: PathBuf,
    },
}

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Seed { file } => seed(&file).await,
    };

    result.map_err(|e| {
        error!("❌ {}", e);
        std::io::Error::other(e.to_string())
    })
}

/// 설정을 읽고 저장소를 연결한 뒤 HTTP 서버를 실행합니다
async fn serve() -> AppResult<()> {
    print_boxed_title("ACSAMS Starting");
    info!("🚀 ACSAMS 시작중...");

    print_step_start(1, "Loading configuration");
    let config = AppConfig::load()?;
    let backend = StorageConfig::backend()?;
    print_sub_task("environment", &format!("{:?}", config.environment));
    print_sub_task("jwt algorithm", &format!("{:?}", config.jwt.algorithm()));
    print_step_complete(1, "Configuration loaded", 2);

    print_step_start(2, "Connecting storage");
    let repos = build_repositories(&config, backend).await?;
    print_step_complete(2, "Storage ready", 4);

    let state = AppState::new(repos, config.jwt.clone());

    if backend == StorageBackend::Memory {
        if let Some(path) = StorageConfig::seed_file() {
            print_step_start(3, "Importing seed users");
            let report = state.users.seed(read_seed_file(&path)?).await?;
            print_seed_report(report.inserted, report.skipped);
            print_step_complete(3, "Seed imported", report.inserted);
        } else {
            warn!("메모리 저장소에 SEED_FILE이 없어 사용자가 없는 상태로 시작합니다");
        }
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state, storage_name(backend)).await
}

/// 시드 파일의 사용자를 저장소에 가져옵니다
async fn seed(file: &Path) -> AppResult<()> {
    print_boxed_title("ACSAMS Seed Import");

    let config = AppConfig::load()?;
    let backend = StorageConfig::backend()?;
    if backend == StorageBackend::Memory {
        warn!("메모리 저장소에 가져온 시드는 프로세스 종료와 함께 사라집니다");
    }

    let records = read_seed_file(file)?;
    info!("📄 시드 파일 로드: {} ({}건)", file.display(), records.len());

    let repos = build_repositories(&config, backend).await?;
    let state = AppState::new(repos, config.jwt);
    let report = state.users.seed(records).await?;

    print_seed_report(report.inserted, report.skipped);
    Ok(())
}

/// 저장소 종류에 맞게 저장소 묶음을 생성합니다
async fn build_repositories(config: &AppConfig, backend: StorageBackend) -> AppResult<Repositories> {
    match backend {
        StorageBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::connect(&config.mongo).await?;
            let redis = RedisClient::connect(&StorageConfig::redis_url()).await?;

            print_sub_task("users / permissions / plans", "MongoDB");
            print_sub_task("refresh tokens", "Redis");

            Repositories::mongodb(&database, redis).await
        }
        StorageBackend::Memory => {
            print_sub_task("users / permissions / plans", "memory");
            print_sub_task("refresh tokens", "memory");

            Ok(Repositories::in_memory())
        }
    }
}

fn storage_name(backend: StorageBackend) -> &'static str {
    match backend {
        StorageBackend::MongoDb => "MongoDB + Redis",
        StorageBackend::Memory => "memory",
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 요청 빈도 제한, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `ConfigError` - Rate Limiting 설정 오류
/// * `InternalError` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState, storage: &str) -> AppResult<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
    let workers = ServerConfig::workers();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API Docs: http://{}/docs", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            AppError::ConfigError(
                "RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST_SIZE must be greater than zero"
                    .to_string(),
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let allowed_origins = ServerConfig::cors_allowed_origins();
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .workers(workers);

    print_final_summary(storage, &bind_address);

    server.run().await.context("HTTP server error")
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=debug acsams
/// RUST_LOG=acsams::services=debug acsams
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 허용 Origin은 `CORS_ALLOWED_ORIGINS`(쉼표 구분)에서 읽습니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
