use dotenvy::dotenv;
use hospital::{
    auth::{hash_password, is_valid_email},
    db::{init_db, models::NewMember},
    services::seed::seed_sample_doctors,
    store::{postgres::PostgresStore, HospitalStore},
};

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Creates the login member described by `SEED_MEMBER_*`, if any.
async fn seed_member(store: &dyn HospitalStore) -> Result<(), Error> {
    let (Ok(name), Ok(email), Ok(password)) = (
        std::env::var("SEED_MEMBER_NAME"),
        std::env::var("SEED_MEMBER_EMAIL"),
        std::env::var("SEED_MEMBER_PASSWORD"),
    ) else {
        log::info!("SEED_MEMBER_* not set, skipping member");
        return Ok(());
    };

    if !is_valid_email(&email) {
        return Err(format!("SEED_MEMBER_EMAIL {:?} is not an email address", email).into());
    }

    if store.find_member_by_email(&email).await?.is_some() {
        log::info!("Member {} already exists", email);
        return Ok(());
    }

    let member = store
        .create_member(NewMember {
            name,
            email,
            password_hash: hash_password(&password)?,
        })
        .await?;
    log::info!("Created member {} ({})", member.id, member.email);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL not set")?;
    let pool = init_db(&database_url).await?;
    let store = PostgresStore::new(pool);

    seed_sample_doctors(&store).await?;
    seed_member(&store).await?;
    Ok(())
}
