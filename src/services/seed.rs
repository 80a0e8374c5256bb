use crate::db::models::NewDoctor;
use crate::store::{HospitalStore, StoreResult};

/// The fixed sample doctors inserted into an empty database.
pub fn sample_doctors() -> Vec<NewDoctor> {
    vec![
        NewDoctor {
            name: "Dr. Alice Smith".to_string(),
            specialization: "Cardiology".to_string(),
            available: true,
        },
        NewDoctor {
            name: "Dr. Bob Johnson".to_string(),
            specialization: "Neurology".to_string(),
            available: true,
        },
        NewDoctor {
            name: "Dr. Carol Williams".to_string(),
            specialization: "Pediatrics".to_string(),
            available: false,
        },
        NewDoctor {
            name: "Dr. David Brown".to_string(),
            specialization: "Orthopedics".to_string(),
            available: true,
        },
    ]
}

/// Seeds the sample doctors unless any doctor already exists.
///
/// Returns the number of doctors inserted, which is zero on every run after
/// the first.
pub async fn seed_sample_doctors(store: &dyn HospitalStore) -> StoreResult<usize> {
    let inserted = store.seed_doctors(sample_doctors()).await?;
    if inserted > 0 {
        log::info!("Seeded {} sample doctors", inserted);
    } else {
        log::info!("Doctors table already populated, skipping seed");
    }
    Ok(inserted)
}
