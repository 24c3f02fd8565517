//! Handle portal position request use case.
//!
//! Validates the inbound request, translates its identifiers to dofus-portals space,
//! fetches, translates the result back and publishes exactly one answer.

use std::sync::Arc;
use std::time::Duration;

use warpgate_shared::{
    BrokerMessage, Delivery, Language, MessageStatus, MessageType, PortalPositionData,
    PortalPositionRequest, ANSWERS_ROUTING_KEY,
};

use super::mapper::map_portal;
use crate::infrastructure::ports::{MessageBrokerPort, PortalProviderPort, ProviderError};
use crate::repositories::ReferenceCaches;

/// Why a request ended with a `FAILED` answer.
#[derive(Debug, thiserror::Error)]
pub enum PortalRequestError {
    #[error("Undecodable message body: {0}")]
    Malformed(String),
    #[error("Unexpected message type {0:?}")]
    UnexpectedKind(MessageType),
    #[error("Portal position request body is missing")]
    MissingBody,
    #[error("Server is required")]
    MissingServer,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Answers one portal position request.
///
/// Every invocation publishes exactly one answer, `SUCCESS` with the mapped positions or
/// status-only `FAILED`, echoing the correlation id and language of the request.
pub struct HandlePortalRequest {
    caches: Arc<ReferenceCaches>,
    provider: Arc<dyn PortalProviderPort>,
    broker: Arc<dyn MessageBrokerPort>,
    timeout: Duration,
}

impl HandlePortalRequest {
    pub fn new(
        caches: Arc<ReferenceCaches>,
        provider: Arc<dyn PortalProviderPort>,
        broker: Arc<dyn MessageBrokerPort>,
        timeout: Duration,
    ) -> Self {
        Self {
            caches,
            provider,
            broker,
            timeout,
        }
    }

    /// Answer a delivery whose body has not been decoded yet.
    ///
    /// A body that is not a valid message is answered `FAILED`, with whatever language
    /// could still be read from it.
    pub async fn execute_raw(
        &self,
        correlation_id: String,
        reply_to: Option<String>,
        body: serde_json::Value,
    ) -> MessageStatus {
        let language = body
            .get("language")
            .cloned()
            .and_then(|value| serde_json::from_value::<Language>(value).ok())
            .unwrap_or_default();

        match serde_json::from_value::<BrokerMessage>(body) {
            Ok(message) => {
                self.execute(Delivery {
                    correlation_id,
                    reply_to,
                    message,
                })
                .await
            }
            Err(e) => {
                let delivery = Delivery {
                    correlation_id,
                    reply_to,
                    message: BrokerMessage {
                        language,
                        ..BrokerMessage::default()
                    },
                };
                self.fail(&delivery, PortalRequestError::Malformed(e.to_string()))
                    .await
            }
        }
    }

    /// Answer `delivery` and return the status that was published.
    ///
    /// Publish failures are logged; the request is then lost.
    pub async fn execute(&self, delivery: Delivery) -> MessageStatus {
        match self.positions(&delivery).await {
            Ok(positions) => {
                tracing::debug!(
                    correlation_id = %delivery.correlation_id,
                    count = positions.len(),
                    "Portal positions retrieved"
                );
                let answer =
                    BrokerMessage::portal_answer(positions, delivery.message.language.clone());
                self.publish(answer, &delivery).await;
                MessageStatus::Success
            }
            Err(e) => self.fail(&delivery, e).await,
        }
    }

    async fn fail(&self, delivery: &Delivery, error: PortalRequestError) -> MessageStatus {
        let request = delivery.message.portal_position_request.as_ref();
        let server_id = request.map(|r| r.server.as_str()).unwrap_or_default();
        let dimension_id = request.map(|r| r.dimension.as_str()).unwrap_or_default();
        tracing::error!(
            correlation_id = %delivery.correlation_id,
            server_id = %server_id,
            dimension_id = %dimension_id,
            error = %error,
            "Portal position request failed"
        );

        let answer = BrokerMessage::portal_answer_failed(delivery.message.language.clone());
        self.publish(answer, delivery).await;
        MessageStatus::Failed
    }

    async fn positions(
        &self,
        delivery: &Delivery,
    ) -> Result<Vec<PortalPositionData>, PortalRequestError> {
        let request = validate(&delivery.message)?;

        tracing::info!(
            correlation_id = %delivery.correlation_id,
            server_id = %request.server,
            dimension_id = %request.dimension,
            "Treating portal position request"
        );

        let server_id = self.caches.servers.resolve_external_id(&request.server);

        let portals = if request.dimension.is_empty() {
            self.provider.list_portals(&server_id, self.timeout).await?
        } else {
            let dimension_id = self
                .caches
                .dimensions
                .resolve_external_id(&request.dimension);
            let portal = self
                .provider
                .get_portal(&server_id, &dimension_id, self.timeout)
                .await?;
            vec![portal]
        };

        Ok(portals
            .iter()
            .map(|portal| map_portal(portal, &self.caches))
            .collect())
    }

    async fn publish(&self, answer: BrokerMessage, delivery: &Delivery) {
        let result = match delivery.reply_target() {
            Some(reply_to) => {
                self.broker
                    .reply(answer, &delivery.correlation_id, reply_to)
                    .await
            }
            None => {
                self.broker
                    .publish(answer, ANSWERS_ROUTING_KEY, &delivery.correlation_id)
                    .await
            }
        };

        if let Err(e) = result {
            tracing::error!(
                correlation_id = %delivery.correlation_id,
                error = %e,
                "Failed to publish portal position answer"
            );
        }
    }
}

fn validate(message: &BrokerMessage) -> Result<&PortalPositionRequest, PortalRequestError> {
    if message.kind != MessageType::PortalPositionRequest {
        return Err(PortalRequestError::UnexpectedKind(message.kind));
    }

    let request = message
        .portal_position_request
        .as_ref()
        .ok_or(PortalRequestError::MissingBody)?;

    if request.server.is_empty() {
        return Err(PortalRequestError::MissingServer);
    }

    Ok(request)
}
