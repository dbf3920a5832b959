use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use vehicle_inventory::clients::{VehicleApi, VehicleHttpClient};
use vehicle_inventory::config::environment::ServerConfig;
use vehicle_inventory::controllers::{Notification, VehicleController};
use vehicle_inventory::dto::{to_view, VehicleRecord};
use vehicle_inventory::models::{VehicleForm, VehicleStatus};
use vehicle_inventory::repositories::InMemoryVehicleRepository;
use vehicle_inventory::routes::create_app;
use vehicle_inventory::state::AppState;
use vehicle_inventory::utils::AppError;

/// Levanta el backend de pruebas en un puerto efímero
async fn spawn_backend() -> (String, InMemoryVehicleRepository) {
    let repository = InMemoryVehicleRepository::with_seed_data();
    let app = create_app(AppState::new(repository.clone(), ServerConfig::default()));

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), repository)
}

/// URL de un puerto sin nadie escuchando
async fn dead_url() -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn client(base_url: &str) -> VehicleHttpClient {
    VehicleHttpClient::new(base_url, Duration::from_secs(5)).unwrap()
}

fn new_record(vin: &str) -> VehicleRecord {
    VehicleRecord {
        id: None,
        vin: vin.to_string(),
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        model_year: "2022".to_string(),
        location: Some("Sevilla".to_string()),
        status: false,
    }
}

#[tokio::test]
async fn test_http_client_full_crud() {
    let (base_url, repository) = spawn_backend().await;
    let api = client(&base_url);

    let vehicles = api.list_vehicles().await.unwrap();
    assert_eq!(vehicles.len(), 3);

    let created = api.create_vehicle(&new_record("JTDBR32E720123456")).await.unwrap();
    let id = created.id.clone().unwrap();
    assert_eq!(repository.len().await, 4);

    let fetched = api.get_vehicle(&id).await.unwrap();
    assert_eq!(fetched, created);
    let view = to_view(fetched.clone()).unwrap();
    assert_eq!(view.status, VehicleStatus::NotAvailable);
    assert_eq!(view.city.as_deref(), Some("Sevilla"));

    let changes = VehicleRecord {
        model: "Yaris".to_string(),
        status: true,
        ..fetched
    };
    let updated = api.update_vehicle(&id, &changes).await.unwrap();
    assert_eq!(updated.model, "Yaris");
    assert!(updated.status);

    api.delete_vehicle(&id).await.unwrap();
    assert_eq!(repository.len().await, 3);
    assert!(matches!(api.get_vehicle(&id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_duplicate_vin_is_rejected_without_persisting() {
    let (base_url, repository) = spawn_backend().await;
    let api = client(&base_url);

    let err = api
        .create_vehicle(&new_record("WBA3A5C50CF370001"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateVin(ref m) if m == "A vehicle with this VIN already exists"));
    assert_eq!(api.list_vehicles().await.unwrap().len(), 3);
    assert_eq!(repository.len().await, 3);
}

#[tokio::test]
async fn test_missing_fields_is_server_error() {
    let (base_url, _) = spawn_backend().await;
    let api = client(&base_url);

    let record = VehicleRecord {
        make: String::new(),
        ..new_record("JTDBR32E720123456")
    };
    let err = api.create_vehicle(&record).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Server { status: 400, ref message } if message == "VIN, Brand, and Model are required fields"
    ));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (base_url, _) = spawn_backend().await;
    let api = client(&base_url);

    let err = api.delete_vehicle("does-not-exist").await.unwrap_err();
    assert_eq!(err.user_message(), "Vehicle with ID does-not-exist not found");
}

#[tokio::test]
async fn test_unreachable_backend() {
    let api = client(&dead_url().await);

    let err = api.list_vehicles().await.unwrap_err();
    assert!(err.is_unreachable());
    assert!(matches!(
        api.create_vehicle(&new_record("JTDBR32E720123456")).await,
        Err(AppError::Unreachable(_))
    ));
}

#[tokio::test]
async fn test_controller_over_http() {
    let (base_url, repository) = spawn_backend().await;
    let mut controller = VehicleController::new(Arc::new(client(&base_url)), 5);

    controller.load().await.unwrap();
    assert_eq!(controller.list().page().total_matches, 3);

    let form = VehicleForm {
        vin: "JTDBR32E720123456".to_string(),
        brand: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: Some(2022),
        status: VehicleStatus::Available,
        city: None,
    };
    let notification = controller.create(&form).await.unwrap();
    assert_eq!(
        notification,
        Notification::success("Vehicle Toyota Corolla created successfully")
    );
    assert_eq!(controller.list().vehicles().len(), 4);

    let duplicate = Notification::from_result(controller.create(&form).await);
    assert!(duplicate.is_error());
    assert_eq!(repository.len().await, 4);

    controller.list_mut().set_search("jtdbr");
    let page = controller.list().page();
    assert_eq!(page.total_matches, 1);
    let id = page.rows[0].id.clone();

    let notification = controller.delete(&id).await.unwrap();
    assert_eq!(notification.message(), "Vehicle deleted successfully");
    assert_eq!(controller.list().page().total_matches, 0);
}

#[tokio::test]
async fn test_controller_reports_connection_error() {
    let mut controller = VehicleController::new(Arc::new(client(&dead_url().await)), 5);

    let err = controller.load().await.unwrap_err();
    assert!(err.is_unreachable());
    assert_eq!(
        controller.connection_error(),
        Some("Could not connect to the backend. Make sure it is running.")
    );
}
