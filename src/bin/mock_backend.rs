use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use vehicle_inventory::config::environment::ServerConfig;
use vehicle_inventory::repositories::InMemoryVehicleRepository;
use vehicle_inventory::routes::create_app;
use vehicle_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Inventory - Mock Backend");
    info!("==================================");

    let config = ServerConfig::from_env()?;
    let addr: SocketAddr = config.server_url().parse()?;

    let repository = InMemoryVehicleRepository::with_seed_data();
    info!("📦 {} vehículos de ejemplo cargados", repository.len().await);

    let app = create_app(AppState::new(repository, config.clone()));

    info!("🌐 Servidor iniciando en http://{} ({})", addr, config.environment);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/vehicles - Listar vehículos");
    info!("   POST   /api/vehicles - Crear vehículo");
    info!("   GET    /api/vehicles/:id - Obtener vehículo");
    info!("   PUT    /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");

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
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
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
