use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;

use vehicle_inventory::clients::{VehicleApi, VehicleHttpClient};
use vehicle_inventory::config::environment::ClientConfig;
use vehicle_inventory::console;
use vehicle_inventory::controllers::VehicleController;
use vehicle_inventory::repositories::InMemoryVehicleRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Logging a stderr para no mezclarlo con la tabla
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;

    let api: Arc<dyn VehicleApi> = if config.use_mock_store {
        info!("🧪 Usando almacén en memoria");
        Arc::new(InMemoryVehicleRepository::with_seed_data())
    } else {
        info!("🌐 Backend en {}", config.api_base_url);
        Arc::new(VehicleHttpClient::from_config(&config)?)
    };

    let controller = VehicleController::new(api, config.page_size);
    console::run(controller).await
}
