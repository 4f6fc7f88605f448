//! Commands run on behalf of an entity page.
//!
//! They call the backend and send the outcome back through the page's
//! channel, where the controller or dispatcher picks it up.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::Backend;
use crate::app::AppMessage;
use crate::commands::Command;
use crate::entity::Entity;
use crate::listing::controller::FetchRequest;
use crate::listing::dispatch::{self, Mutation};
use crate::listing::fetch::fetch;
use crate::listing::message::ListMsg;

/// Run one list fetch.
pub struct FetchPageCmd<E: Entity> {
    backend: Arc<dyn Backend>,
    request: FetchRequest,
    lookup_limit: usize,
    tx: UnboundedSender<ListMsg<E>>,
}

impl<E: Entity> FetchPageCmd<E> {
    pub fn new(
        backend: Arc<dyn Backend>,
        request: FetchRequest,
        lookup_limit: usize,
        tx: UnboundedSender<ListMsg<E>>,
    ) -> Self {
        Self {
            backend,
            request,
            lookup_limit,
            tx,
        }
    }
}

#[async_trait]
impl<E: Entity> Command for FetchPageCmd<E> {
    fn name(&self) -> String {
        format!("Loading {} page {}", E::TITLE, self.request.query.page.number)
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        let result = fetch::<E>(self.backend.as_ref(), &self.request.query, self.lookup_limit).await;
        let _ = self.tx.send(ListMsg::Loaded {
            seq: self.request.seq,
            result,
        });
        Ok(())
    }
}

/// Send one mutation to the backend.
pub struct MutateCmd<E: Entity> {
    backend: Arc<dyn Backend>,
    mutation: Mutation,
    tx: UnboundedSender<ListMsg<E>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> MutateCmd<E> {
    pub fn new(backend: Arc<dyn Backend>, mutation: Mutation, tx: UnboundedSender<ListMsg<E>>) -> Self {
        Self {
            backend,
            mutation,
            tx,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Command for MutateCmd<E> {
    fn name(&self) -> String {
        match &self.mutation {
            Mutation::Delete { label, .. } => format!("Deleting {} {label}", E::NOUN),
            Mutation::SetStatus { label, .. } => format!("Changing status of {} {label}", E::NOUN),
            Mutation::Create { .. } => format!("Creating {}", E::NOUN),
            Mutation::Update { .. } => format!("Updating {}", E::NOUN),
        }
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        let result = dispatch::execute(self.backend.as_ref(), E::RESOURCE, &self.mutation).await;
        let _ = self.tx.send(ListMsg::Mutated {
            mutation: self.mutation,
            result,
        });
        Ok(())
    }
}
