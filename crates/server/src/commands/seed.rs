//! Seed command - demo accounts, stores and ratings.

use rand::seq::index::sample;
use rand::Rng;

use common::{AppError, AppResult};
use domain::{Password, Rating, Store, User, UserRole};

use crate::cli::args::SeedArgs;
use crate::config::{Config, SEED_RATINGS_PER_USER, SEED_STORE_OWNER_COUNT, SEED_USER_COUNT};
use crate::infra::{Database, Persistence, UnitOfWork};

struct SeedAccount {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    address: &'static str,
    role: UserRole,
}

const ADMIN: SeedAccount = SeedAccount {
    name: "Platform Administrator Master",
    email: "admin@domain.com",
    password: "Admin@123",
    address: "123 Admin Street, Central City",
    role: UserRole::Admin,
};

const USERS: [SeedAccount; SEED_USER_COUNT] = [
    SeedAccount {
        name: "Alice Johnson Whitfield",
        email: "alice@example.com",
        password: "Alice@123",
        address: "101 Maple Avenue, Springfield",
        role: UserRole::User,
    },
    SeedAccount {
        name: "Robert Smith Carrington",
        email: "bob@example.com",
        password: "Bob@12345",
        address: "102 Maple Avenue, Springfield",
        role: UserRole::User,
    },
    SeedAccount {
        name: "Charlie Davis Pemberton",
        email: "charlie@example.com",
        password: "Charlie@123",
        address: "103 Maple Avenue, Springfield",
        role: UserRole::User,
    },
    SeedAccount {
        name: "Dana Lee Montgomery Hall",
        email: "dana@example.com",
        password: "Dana@1234",
        address: "104 Maple Avenue, Springfield",
        role: UserRole::User,
    },
    SeedAccount {
        name: "Elijah Walker Fairbanks",
        email: "eli@example.com",
        password: "Eli@12345",
        address: "105 Maple Avenue, Springfield",
        role: UserRole::User,
    },
];

const STORE_NAMES: [&str; SEED_STORE_OWNER_COUNT] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
];

const OWNER_NAMES: [&str; SEED_STORE_OWNER_COUNT] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
];

/// For every user, distinct store indexes with a value in 1..=5
fn plan_ratings<R: Rng + ?Sized>(
    rng: &mut R,
    user_count: usize,
    store_count: usize,
    per_user: usize,
) -> Vec<Vec<(usize, i32)>> {
    let per_user = per_user.min(store_count);
    (0..user_count)
        .map(|_| {
            sample(rng, store_count, per_user)
                .into_iter()
                .map(|store_idx| (store_idx, rng.random_range(1..=5)))
                .collect()
        })
        .collect()
}

async fn create_account<U: UnitOfWork + ?Sized>(
    uow: &U,
    name: String,
    email: String,
    password: &str,
    address: String,
    role: UserRole,
) -> AppResult<User> {
    let hash = Password::new(password)?.into_string();
    uow.users()
        .create(User::new(name, email, hash, address, role))
        .await
}

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let uow = Persistence::new(db.get_connection());

    if args.reset {
        let ratings = uow.ratings().delete_all().await?;
        let stores = uow.stores().delete_all().await?;
        let users = uow.users().delete_all().await?;
        tracing::warn!(ratings, stores, users, "Existing data deleted");
    } else if uow.users().count().await? > 0 {
        tracing::warn!("Database already contains users, skipping seed (use --reset to replace them)");
        return Ok(());
    }

    create_account(
        &uow,
        ADMIN.name.into(),
        ADMIN.email.into(),
        ADMIN.password,
        ADMIN.address.into(),
        ADMIN.role,
    )
    .await?;

    let mut users = Vec::with_capacity(USERS.len());
    for account in &USERS {
        let user = create_account(
            &uow,
            account.name.into(),
            account.email.into(),
            account.password,
            account.address.into(),
            account.role,
        )
        .await?;
        users.push(user);
    }

    let mut stores = Vec::with_capacity(STORE_NAMES.len());
    for (i, (store_name, owner_suffix)) in STORE_NAMES.iter().zip(OWNER_NAMES).enumerate() {
        let number = i + 1;
        let owner = create_account(
            &uow,
            format!("Store Owner Number {}", owner_suffix),
            format!("owner{}@stores.com", number),
            &format!("Owner{}@{}", owner_suffix, number),
            format!("{} Store Street, Commerce Town", number),
            UserRole::StoreOwner,
        )
        .await?;

        let store = Store::new(
            format!("{} Store", store_name),
            format!("{}00 {} Street", number, store_name),
            owner.id,
        );
        stores.push(uow.stores().create(store).await?);
    }

    // ThreadRng is not Send; draw everything before the next await
    let plan = plan_ratings(&mut rand::rng(), users.len(), stores.len(), SEED_RATINGS_PER_USER);

    let mut rating_count = 0usize;
    for (user, choices) in users.iter().zip(plan) {
        for (store_idx, value) in choices {
            let rating = Rating::new(value, user.id, stores[store_idx].id)?;
            uow.ratings().create(rating).await?;
            rating_count += 1;
        }
    }

    tracing::info!(
        users = users.len() + 1 + stores.len(),
        stores = stores.len(),
        ratings = rating_count,
        "Seed data created"
    );
    Ok(())
}
