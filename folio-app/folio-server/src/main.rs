use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use folio_api::{build_router, AppState};
use folio_core::{
    ContactConfig, ContactService, MailTemplates, MailTransport, ResumeDeliveryConfig,
    ResumeDeliveryService,
};
use folio_infrastructure::{RecaptchaVerifier, SmtpMailTransport};
use folio_security::{LinkTokenService, SystemClock};
use folio_shared::{telemetry::init_telemetry, AppConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Telemetry depends on the log section, so configuration comes first
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    let tokens = Arc::new(
        LinkTokenService::new(&config.token.secret, Arc::new(SystemClock))
            .context("link token service")?,
    );

    let smtp = SmtpMailTransport::new(&config.mail).context("smtp transport")?;
    match smtp.verify_connection().await {
        Ok(true) => info!("SMTP relay {} reachable", config.mail.smtp_host),
        Ok(false) => warn!("SMTP relay {} refused the test connection", config.mail.smtp_host),
        Err(e) => warn!("SMTP relay {} unreachable: {}", config.mail.smtp_host, e),
    }
    let mailer: Arc<dyn MailTransport> = Arc::new(smtp);

    let captcha = Arc::new(RecaptchaVerifier::new(&config.captcha).context("captcha verifier")?);
    let templates = Arc::new(MailTemplates::new().context("mail templates")?);

    if config.token.single_use {
        info!("Download links are single-use");
    }

    let state = AppState {
        resume: Arc::new(ResumeDeliveryService::new(
            tokens,
            mailer.clone(),
            templates.clone(),
            ResumeDeliveryConfig::from(&config),
        )),
        contact: Arc::new(ContactService::new(
            captcha,
            mailer,
            templates,
            ContactConfig::from(&config),
        )),
    };

    let app = build_router(state, &config.cors);

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
