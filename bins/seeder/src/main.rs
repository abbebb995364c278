//! Database seeder for Bursary development and testing.
//!
//! Creates the initial director account so that staff management is
//! reachable on a fresh database. Staff accounts can only be created by a
//! director, so one has to exist before the API is usable.
//!
//! Usage: cargo run --bin seeder

use bursary_core::access::Role;
use bursary_core::auth::hash_password;
use bursary_db::UserRepository;
use bursary_db::repositories::user::{CreateUserInput, UserError};

const DIRECTOR_USERNAME: &str = "director";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let password = std::env::var("BURSARY_SEED_PASSWORD")
        .expect("BURSARY_SEED_PASSWORD must be set in environment");

    println!("Connecting to database...");
    let db = bursary_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding director account...");
    let repo = UserRepository::new(db);
    let password_hash = hash_password(&password).expect("Failed to hash password");

    match repo
        .create(CreateUserInput {
            username: DIRECTOR_USERNAME.to_string(),
            password_hash,
            full_name: "Finance Director".to_string(),
            role: Role::Director,
        })
        .await
    {
        Ok(user) => println!("Created director account '{}' ({})", user.username, user.id),
        Err(UserError::UsernameTaken(_)) => {
            println!("Director account already exists, nothing to do");
        }
        Err(e) => panic!("Failed to seed director account: {e}"),
    }

    println!("Seeding complete!");
}
