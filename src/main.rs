use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use address_book::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use address_book::database;
use address_book::repositories::{AddressRepository, InMemoryAddressRepository, PgAddressRepository};
use address_book::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("📒 {} v{} ({})", config.app_name, config.version, config.environment);
    info!("================================================");

    // Inicializar almacenamiento
    let repository: Arc<dyn AddressRepository> = match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = match database::create_pool(&db_config).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            database::run_migrations(&pool).await?;
            Arc::new(PgAddressRepository::new(pool))
        }
        StorageBackend::Memory => {
            warn!("⚠️ Usando almacenamiento en memoria: los datos no se persisten");
            Arc::new(InMemoryAddressRepository::new())
        }
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección de servidor inválida: {}", config.server_url()))?;

    let app = create_app(AppState::new(repository, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   POST   /addresses - Crear dirección");
    info!("   GET    /addresses - Listar direcciones");
    info!("   GET    /addresses/nearby - Direcciones cercanas");
    info!("   POST   /addresses/search - Búsqueda avanzada");
    info!("   GET    /addresses/:id - Obtener dirección");
    info!("   PATCH  /addresses/:id - Actualizar dirección");
    info!("   DELETE /addresses/:id - Eliminar dirección");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
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
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
