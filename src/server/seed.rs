//! Demo data for local development.

use chrono::{Duration, NaiveDate, Utc};

use super::history::Actor;
use super::store::AssetStore;
use crate::domain::{
    AssetAttributes, AssetCondition, AssetStatus, Coordinate, MaintenanceStatus, MaintenanceType,
    NewMaintenanceRecord,
};
use crate::error::ApiError;

fn bench() -> AssetAttributes {
    AssetAttributes {
        name: "Bench 12, Rose Garden".to_string(),
        description: Some("Cast iron bench with hardwood slats".to_string()),
        serial_number: Some("BN-2019-0012".to_string()),
        manufacturer: Some("Urbana Furnishings".to_string()),
        model: Some("Classic 180".to_string()),
        category_id: 3,
        subcategory_id: None,
        park_id: 1,
        amenity_id: Some(4),
        location_description: Some("East path, next to the fountain".to_string()),
        coordinate: Coordinate::new(20.6736, -103.344),
        status: AssetStatus::Active,
        condition: AssetCondition::Good,
        acquisition_date: NaiveDate::from_ymd_opt(2019, 4, 2),
        acquisition_cost: Some(8_500.0),
        responsible_person_id: Some(7),
        notes: None,
    }
}

fn play_structure() -> AssetAttributes {
    AssetAttributes {
        name: "Play structure A".to_string(),
        description: Some("Climbing frame with two slides".to_string()),
        serial_number: Some("PS-2016-0001".to_string()),
        manufacturer: None,
        model: None,
        category_id: 5,
        subcategory_id: Some(12),
        park_id: 2,
        amenity_id: None,
        location_description: Some("Children's area".to_string()),
        coordinate: None,
        status: AssetStatus::Maintenance,
        condition: AssetCondition::Fair,
        acquisition_date: NaiveDate::from_ymd_opt(2016, 9, 20),
        acquisition_cost: None,
        responsible_person_id: None,
        notes: Some("Replace left slide fasteners".to_string()),
    }
}

/// Registers a couple of assets with maintenance, one of them overdue.
///
/// # Errors
///
/// Returns the store error if a demo record is rejected.
pub async fn seed_demo_data(store: &AssetStore) -> Result<(), ApiError> {
    let actor = Actor {
        name: "Demo Loader".to_string(),
        username: "demo".to_string(),
    };
    let now = Utc::now();

    let bench = store.register(bench(), &actor).await?;
    store
        .create_maintenance(
            bench.id,
            NewMaintenanceRecord {
                date: now - Duration::days(90),
                maintenance_type: MaintenanceType::Preventive,
                description: "Sanded and varnished slats".to_string(),
                cost: Some(350.0),
                performed_by: Some("Carpentry crew".to_string()),
                performer_id: None,
                next_maintenance_date: Some(now + Duration::days(90)),
                status: MaintenanceStatus::Completed,
                notes: None,
            },
            &actor,
        )
        .await?;

    let play = store.register(play_structure(), &actor).await?;
    store
        .create_maintenance(
            play.id,
            NewMaintenanceRecord {
                date: now - Duration::days(200),
                maintenance_type: MaintenanceType::Corrective,
                description: "Replaced worn chain on swing".to_string(),
                cost: Some(120.0),
                performed_by: None,
                performer_id: Some(7),
                next_maintenance_date: Some(now - Duration::days(20)),
                status: MaintenanceStatus::Completed,
                notes: Some("Inspect slides on next visit".to_string()),
            },
            &actor,
        )
        .await?;

    tracing::info!(assets = store.len().await, "demo data seeded");
    Ok(())
}
