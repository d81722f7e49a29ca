//! Dependency injection module using Shaku.

use reflink_config::AppConfig;
use reflink_core::ReflinkResult;
use reflink_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, LinkRepository,
    PaymentRepository, SqliteLinkRepository, SqlitePaymentRepository, SqliteUserRepository,
    UserRepository,
};
use reflink_security::{
    PasswordHasher, PasswordHasherParameters, Sha256TokenGenerator, Sha256TokenGeneratorParameters,
};
use reflink_service::{
    AggregateCache, CacheInterface, DefaultUserValidator, InMemoryCache, LinkService,
    LinkServiceComponent, PaymentService, PaymentServiceComponent, ReadModelCache,
    ReadModelCacheParameters, RedisCacheService, RedisCacheServiceParameters, UserService,
    UserServiceComponent,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// Single-process module: SQLite store, cache, security components and the
// business services.
module! {
    pub ReflinkModule {
        components = [
            DatabasePool,
            SqliteUserRepository,
            SqliteLinkRepository,
            SqlitePaymentRepository,
            PasswordHasher,
            Sha256TokenGenerator,
            RedisCacheService,
            ReadModelCache,
            DefaultUserValidator,
            LinkServiceComponent,
            UserServiceComponent,
            PaymentServiceComponent,
        ],
        providers = [],
    }
}

/// Connects the store, runs migrations if configured and builds the module.
///
/// With Redis disabled the cache is an in-process map.
pub async fn build_module(config: &AppConfig) -> ReflinkResult<Arc<ReflinkModule>> {
    let db_pool = DatabasePool::new(&config.database).await?;

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let password_hasher = PasswordHasher::from_config(&config.security);

    let mut builder = ReflinkModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<PasswordHasher>(PasswordHasherParameters {
            argon2: password_hasher.argon2_arc(),
        })
        .with_component_parameters::<Sha256TokenGenerator>(Sha256TokenGeneratorParameters {
            secret: config.links.token_secret.clone(),
        })
        .with_component_parameters::<ReadModelCache>(ReadModelCacheParameters {
            ttl: config.links.cache_ttl(),
        });

    if config.redis.enabled {
        let pool = RedisCacheService::create_pool(&config.redis)?;
        builder = builder.with_component_parameters::<RedisCacheService>(
            RedisCacheServiceParameters { pool: Some(pool) },
        );
        info!("Using Redis cache at {}", config.redis.url);
    } else {
        builder = builder
            .with_component_override::<dyn CacheInterface>(Box::new(InMemoryCache::new()));
        info!("Redis disabled, using in-process cache");
    }

    Ok(Arc::new(builder.build()))
}

/// Trait for resolving services from modules.
pub trait ServiceResolver {
    /// Resolves the link service from the module.
    fn link_service(&self) -> Arc<dyn LinkService>;

    /// Resolves the user service from the module.
    fn user_service(&self) -> Arc<dyn UserService>;

    /// Resolves the payment service from the module.
    fn payment_service(&self) -> Arc<dyn PaymentService>;
}

impl ServiceResolver for ReflinkModule {
    fn link_service(&self) -> Arc<dyn LinkService> {
        self.resolve()
    }

    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn payment_service(&self) -> Arc<dyn PaymentService> {
        self.resolve()
    }
}

/// Trait for resolving infrastructure components from modules.
pub trait InfrastructureResolver {
    /// Resolves the database pool from the module.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the cache backend from the module.
    fn cache(&self) -> Arc<dyn CacheInterface>;

    /// Resolves the read model from the module.
    fn read_model(&self) -> Arc<dyn AggregateCache>;
}

impl InfrastructureResolver for ReflinkModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    fn read_model(&self) -> Arc<dyn AggregateCache> {
        self.resolve()
    }
}
