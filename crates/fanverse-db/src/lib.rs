//! # fanverse-db
//!
//! Database layer implementing the `fanverse-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and startup migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the cascade cleanup that runs
//!   inside every deleting transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fanverse_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use fanverse_db::repositories::PgPostRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let posts = PgPostRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCartRepository, PgCommentRepository, PgCommunityRepository, PgCommunityUserRepository,
    PgLikeRepository, PgLiveRepository, PgMediaRepository, PgMembershipRepository,
    PgMerchandiseRepository, PgNoticeRepository, PgPostRepository, PgProductRepository,
    PgStaffRepository, PgUserRepository,
};
