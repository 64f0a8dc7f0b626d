//! Production gateway over the catalogue API

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tracing::debug;
use url::Url;

use super::wire::{self, OrderPayload, SetIdPayload};
use super::{CollectionApi, GatewayError};
use crate::config::ClientConfig;
use crate::http::{HttpClient, HttpResponse};
use crate::session::Session;
use bricklist_domain::{CatalogSet, ListDetail, ListId, ListSummary, ReorderTarget, SetNum};

/// [`CollectionApi`] implementation issuing authenticated HTTP calls.
pub struct RemoteGateway {
    http: HttpClient,
    base: String,
    session: Arc<Session>,
}

impl RemoteGateway {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Self {
        Self {
            http: HttpClient::new(
                &config.user_agent,
                Duration::from_secs(config.timeout_secs),
            ),
            base: config.api_base.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let raw = format!("{}/{}", self.base, path);
        Url::parse(&raw).map_err(|_| GatewayError::Parse(format!("invalid endpoint: {}", raw)))
    }

    fn order_path(target: ReorderTarget) -> String {
        match target {
            ReorderTarget::Wishlist => "collections/wishlist/order".to_string(),
            ReorderTarget::List(id) => format!("lists/{}/order", id),
        }
    }

    async fn get(&self, path: &str) -> Result<HttpResponse, GatewayError> {
        let url = self.endpoint(path)?;
        debug!(%url, "gateway GET");
        let resp = self
            .http
            .request(Method::GET, url, self.session.token().as_deref())
            .await?;
        classify(resp)
    }

    /// POST that swallows 409 as idempotent success.
    async fn post_add(&self, path: &str, set_id: &SetNum) -> Result<(), GatewayError> {
        let url = self.endpoint(path)?;
        debug!(%url, set_id = %set_id, "gateway add");
        let resp = self
            .http
            .request_json(
                Method::POST,
                url,
                self.session.token().as_deref(),
                &SetIdPayload { set_id },
            )
            .await?;
        add_outcome(resp)
    }

    /// DELETE that swallows 404 as idempotent success.
    async fn delete_remove(&self, path: &str) -> Result<(), GatewayError> {
        let url = self.endpoint(path)?;
        debug!(%url, "gateway remove");
        let resp = self
            .http
            .request(Method::DELETE, url, self.session.token().as_deref())
            .await?;
        remove_outcome(resp)
    }
}

impl CollectionApi for RemoteGateway {
    async fn add_to_owned(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.post_add("collections/owned", set_id).await
    }

    async fn remove_from_owned(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.delete_remove(&format!("collections/owned/{}", set_id))
            .await
    }

    async fn add_to_wishlist(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.post_add("collections/wishlist", set_id).await
    }

    async fn remove_from_wishlist(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.delete_remove(&format!("collections/wishlist/{}", set_id))
            .await
    }

    async fn owned_sets(&self) -> Result<Vec<CatalogSet>, GatewayError> {
        let resp = self.get("collections/owned").await?;
        wire::parse_set_rows(&resp.body)
    }

    async fn wishlist_sets(&self) -> Result<Vec<CatalogSet>, GatewayError> {
        let resp = self.get("collections/wishlist").await?;
        wire::parse_set_rows(&resp.body)
    }

    async fn my_lists(&self) -> Result<Vec<ListSummary>, GatewayError> {
        let resp = self.get("lists/me").await?;
        wire::parse_list_summaries(&resp.body)
    }

    async fn list_detail(&self, list_id: ListId) -> Result<ListDetail, GatewayError> {
        let resp = self.get(&format!("lists/{}", list_id)).await?;
        wire::parse_list_detail(&resp.body)
    }

    async fn add_item_to_list(
        &self,
        list_id: ListId,
        set_id: &SetNum,
    ) -> Result<(), GatewayError> {
        self.post_add(&format!("lists/{}/items", list_id), set_id)
            .await
    }

    async fn remove_item_from_list(
        &self,
        list_id: ListId,
        set_id: &SetNum,
    ) -> Result<(), GatewayError> {
        self.delete_remove(&format!("lists/{}/items/{}", list_id, set_id))
            .await
    }

    async fn persist_list_order(
        &self,
        target: ReorderTarget,
        ordered: &[SetNum],
    ) -> Result<(), GatewayError> {
        let url = self.endpoint(&Self::order_path(target))?;
        debug!(%url, len = ordered.len(), "gateway persist order");
        let resp = self
            .http
            .request_json(
                Method::PUT,
                url,
                self.session.token().as_deref(),
                &OrderPayload {
                    ordered_set_ids: ordered,
                },
            )
            .await?;
        classify(resp).map(|_| ())
    }
}

/// Map a response status onto the gateway error taxonomy.
fn classify(resp: HttpResponse) -> Result<HttpResponse, GatewayError> {
    match resp.status {
        200..=299 => Ok(resp),
        401 | 403 => Err(GatewayError::NotAllowed {
            message: wire::error_detail(&resp.body),
        }),
        404 => Err(GatewayError::NotFound),
        status => Err(GatewayError::Server {
            status,
            message: wire::error_detail(&resp.body),
        }),
    }
}

/// Outcome of an add call: 409 means the desired end state already holds.
fn add_outcome(resp: HttpResponse) -> Result<(), GatewayError> {
    if resp.status == 409 {
        return Ok(());
    }
    classify(resp).map(|_| ())
}

/// Outcome of a remove call: 404 means the member was already absent.
fn remove_outcome(resp: HttpResponse) -> Result<(), GatewayError> {
    if resp.status == 404 {
        return Ok(());
    }
    classify(resp).map(|_| ())
}
