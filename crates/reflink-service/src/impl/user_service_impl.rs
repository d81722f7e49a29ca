//! User service implementation.

use crate::cache::{AggregateCache, EntityKind};
use crate::dto::{CreateUserRequest, ReferralRegistrationRequest};
use crate::link_service::LinkService;
use crate::user_service::UserService;
use crate::user_validator::UserValidator;
use async_trait::async_trait;
use reflink_core::{NewUser, Payment, ReflinkError, ReflinkResult, User, UserId};
use reflink_repository::UserRepository;
use reflink_security::PasswordHasherInterface;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    link_service: Arc<dyn LinkService>,
    #[shaku(inject)]
    validator: Arc<dyn UserValidator>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    read_model: Arc<dyn AggregateCache>,
}

impl UserServiceComponent {
    /// Creates a user service from its collaborators.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        link_service: Arc<dyn LinkService>,
        validator: Arc<dyn UserValidator>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        read_model: Arc<dyn AggregateCache>,
    ) -> Self {
        Self {
            user_repository,
            link_service,
            validator,
            password_hasher,
            read_model,
        }
    }

    fn check(&self, request: &CreateUserRequest) -> ReflinkResult<()> {
        let errors = self.validator.validate(request);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReflinkError::InvalidFields(errors))
        }
    }

    async fn persist(
        &self,
        request: CreateUserRequest,
        referrer_id: Option<UserId>,
    ) -> ReflinkResult<User> {
        let password_hash = self.password_hasher.hash(&request.password)?;

        let user = self
            .user_repository
            .save(NewUser {
                first_name: request.first_name,
                second_name: request.second_name,
                last_name: request.last_name,
                email: request.email,
                password_hash,
                phone: request.phone,
                role: request.role,
                referrer_id,
            })
            .await?;

        self.read_model.refresh(EntityKind::User).await;

        info!("User created: {}", user.id);
        Ok(user)
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn create_user(&self, request: CreateUserRequest) -> ReflinkResult<User> {
        debug!("Creating user: {}", request.email);

        self.check(&request)?;

        let referrer_id = request.referrer();
        self.persist(request, referrer_id).await
    }

    async fn create_user_with_referral(
        &self,
        request: ReferralRegistrationRequest,
    ) -> ReflinkResult<User> {
        debug!("Creating referred user: {}", request.user.email);

        self.check(&request.user)?;

        let link = self
            .link_service
            .redeem_for_referral(&request.link)
            .await?
            .ok_or_else(|| ReflinkError::validation("invalid referral link"))?;

        match self.persist(request.user, Some(link.referrer_id)).await {
            Ok(user) => Ok(user),
            Err(e) => {
                if let Err(release_error) = self.link_service.release_redemption(&link).await {
                    warn!(
                        "Failed to release redemption of link {}: {}",
                        link.id, release_error
                    );
                }
                Err(e)
            }
        }
    }

    async fn list_users(&self) -> ReflinkResult<Vec<User>> {
        self.read_model.users().await
    }

    async fn list_user_payments(&self, id: UserId) -> ReflinkResult<Vec<Payment>> {
        self.read_model.payments_by_user(id).await
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent").finish_non_exhaustive()
    }
}
