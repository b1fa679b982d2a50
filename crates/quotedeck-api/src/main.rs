//! 와치리스트 시세 대시보드 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 와치리스트 시세, 인트라데이 차트, 헬스 체크 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use quotedeck_api::routes::create_api_router;
use quotedeck_api::state::AppState;
use quotedeck_core::{init_logging, AppConfig, LogConfig, LogFormat};
use quotedeck_data::{source_from_config, QuoteService};
use quotedeck_market::{FetchPlan, SeriesProvider, YahooChartClient};

/// 설정 로드.
///
/// 파일이 없으면 기본값으로 동작합니다. 파일이나 환경 변수가 잘못된
/// 경우에도 기본값으로 내려가며, 오류는 로깅 초기화 후 출력하도록
/// 돌려줍니다.
fn load_config() -> (AppConfig, Option<String>) {
    match AppConfig::load_default() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e.to_string())),
    }
}

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
///   예: `https://dashboard.example.com,https://admin.example.com`
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        // 조회 전용 API
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드 (로깅 초기화 전이므로 오류는 나중에 출력)
    let (config, config_error) = load_config();

    // tracing 초기화
    let log_format = config.logging.format.parse::<LogFormat>().unwrap_or_default();
    init_logging(LogConfig::new(&config.logging.level).with_format(log_format))?;

    info!("Starting Quotedeck API server...");
    if let Some(e) = config_error {
        warn!(error = %e, "설정 로드 실패, 기본값으로 동작");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            error!(
                host = %config.server.host,
                port = config.server.port,
                error = %e,
                "소켓 주소 설정이 유효하지 않습니다. QUOTEDECK__SERVER__HOST, QUOTEDECK__SERVER__PORT를 확인하세요."
            );
            e
        })?;

    // 프로바이더와 시세 서비스 조립
    let plan = FetchPlan::with_lookback_days(
        config.fetch.fine_lookback_days,
        config.fetch.coarse_lookback_days,
    );
    let provider: Arc<dyn SeriesProvider> = Arc::new(YahooChartClient::new(
        Duration::from_secs(config.fetch.timeout_secs),
    )?);
    let source = source_from_config(&config.watchlist);
    let quotes = QuoteService::new(provider.clone(), source, plan);

    let state = Arc::new(AppState::new(Arc::new(quotes), provider));
    info!(version = %state.version, "Application state initialized");

    let app = create_router(state);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료를 시작합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
