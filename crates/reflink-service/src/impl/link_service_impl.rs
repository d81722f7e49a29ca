//! Link service implementation.

use crate::cache::{AggregateCache, EntityKind};
use crate::dto::{CreateLinkRequest, IssuedLinkResponse};
use crate::link_service::LinkService;
use crate::metrics::{LinkMetrics, RedemptionOutcome};
use async_trait::async_trait;
use reflink_core::{Link, NewLink, ReflinkError, ReflinkResult, User, ValidateExt};
use reflink_repository::{LinkRepository, UserRepository};
use reflink_security::TokenGenerator;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Link service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = LinkService)]
pub struct LinkServiceComponent {
    #[shaku(inject)]
    link_repository: Arc<dyn LinkRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    token_generator: Arc<dyn TokenGenerator>,
    #[shaku(inject)]
    read_model: Arc<dyn AggregateCache>,
}

impl LinkServiceComponent {
    /// Creates a link service from its collaborators.
    #[must_use]
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        user_repository: Arc<dyn UserRepository>,
        token_generator: Arc<dyn TokenGenerator>,
        read_model: Arc<dyn AggregateCache>,
    ) -> Self {
        Self {
            link_repository,
            user_repository,
            token_generator,
            read_model,
        }
    }

    async fn find_link(&self, token: &str) -> ReflinkResult<Link> {
        self.link_repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| ReflinkError::not_found("Link", token))
    }
}

#[async_trait]
impl LinkService for LinkServiceComponent {
    async fn issue_link(&self, request: CreateLinkRequest) -> ReflinkResult<IssuedLinkResponse> {
        debug!("Issuing link for user {} with limit {}", request.user_id, request.limit);

        request.validate_request()?;

        if self.user_repository.find_by_id(request.user_id).await?.is_none() {
            return Err(ReflinkError::not_found("User", request.user_id));
        }

        let token = self.token_generator.generate(request.user_id);
        let link = self
            .link_repository
            .save(NewLink {
                token,
                referrer_id: request.user_id,
                limit: request.limit,
            })
            .await?;

        LinkMetrics::link_issued();
        self.read_model.refresh(EntityKind::Link).await;

        info!("Link {} issued for user {}", link.id, link.referrer_id);
        Ok(IssuedLinkResponse::from(link))
    }

    async fn redeem(&self, token: &str) -> ReflinkResult<bool> {
        Ok(self.redeem_for_referral(token).await?.is_some())
    }

    async fn redeem_for_referral(&self, token: &str) -> ReflinkResult<Option<Link>> {
        let Some(link) = self.link_repository.find_by_token(token).await? else {
            debug!("Redemption of unknown token refused");
            LinkMetrics::redemption(RedemptionOutcome::UnknownToken);
            return Ok(None);
        };

        if link.token != token {
            return Err(ReflinkError::integrity(format!(
                "lookup by token returned link {} with a different token",
                link.id
            )));
        }

        if !link.enabled {
            debug!("Redemption of disabled link {} refused", link.id);
            LinkMetrics::redemption(RedemptionOutcome::Disabled);
            return Ok(None);
        }

        if !self.link_repository.try_redeem(link.id).await? {
            debug!("Link {} is exhausted", link.id);
            LinkMetrics::redemption(RedemptionOutcome::Exhausted);
            return Ok(None);
        }

        LinkMetrics::redemption(RedemptionOutcome::Redeemed);
        self.read_model.refresh(EntityKind::Link).await;

        info!("Link {} redeemed", link.id);
        Ok(Some(link))
    }

    async fn release_redemption(&self, link: &Link) -> ReflinkResult<()> {
        if self.link_repository.release_redemption(link.id).await? {
            LinkMetrics::redemption(RedemptionOutcome::Released);
            self.read_model.refresh(EntityKind::Link).await;
            info!("Redemption of link {} released", link.id);
        }
        Ok(())
    }

    async fn get_referrer(&self, token: &str) -> ReflinkResult<User> {
        let link = self.find_link(token).await?;

        self.user_repository
            .find_by_id(link.referrer_id)
            .await?
            .ok_or_else(|| ReflinkError::not_found("User", link.referrer_id))
    }

    async fn set_link_status(&self, token: &str, enabled: bool) -> ReflinkResult<Link> {
        let link = self.find_link(token).await?;

        if !self.link_repository.set_enabled(link.id, enabled).await? {
            return Err(ReflinkError::not_found("Link", token));
        }

        self.read_model.refresh(EntityKind::Link).await;

        info!("Link {} {}", link.id, if enabled { "enabled" } else { "disabled" });
        self.find_link(token).await
    }

    async fn list_links(&self) -> ReflinkResult<Vec<Link>> {
        self.read_model.links().await
    }
}

impl std::fmt::Debug for LinkServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkServiceComponent").finish_non_exhaustive()
    }
}
