use std::marker::PhantomData;

use async_trait::async_trait;
use contracts::shared::envelope::{ListEnvelope, Page};
use serde::de::DeserializeOwned;

use crate::shared::http::{ApiClient, ApiError};

use super::entity::CollectionEntity;
use super::lookups::LookupSource;
use super::query::ListQuery;

/// REST collection endpoint of one entity.
#[async_trait(?Send)]
pub trait CollectionApi<E: CollectionEntity> {
    async fn list(&self, query: &ListQuery) -> Result<Page<E>, ApiError>;
    async fn create(&self, payload: &E::Create) -> Result<E, ApiError>;
    async fn update(&self, id: i64, payload: &E::Update) -> Result<E, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
    async fn restore(&self, id: i64) -> Result<E, ApiError>;
}

/// `GET/POST {PATH}`, `PUT/DELETE {PATH}/{id}`, `POST {PATH}/{id}/restore`.
pub struct RestCollection<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RestCollection<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: CollectionEntity> RestCollection<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn record_path(id: i64) -> String {
        format!("{}/{}", E::PATH, id)
    }
}

#[async_trait(?Send)]
impl<E: CollectionEntity> CollectionApi<E> for RestCollection<E> {
    async fn list(&self, query: &ListQuery) -> Result<Page<E>, ApiError> {
        let envelope: ListEnvelope<E> = self
            .client
            .get_json(E::PATH, Some(&query.to_query_string()))
            .await?;
        Ok(envelope.into_page())
    }

    async fn create(&self, payload: &E::Create) -> Result<E, ApiError> {
        self.client.post_json(E::PATH, Some(payload)).await
    }

    async fn update(&self, id: i64, payload: &E::Update) -> Result<E, ApiError> {
        self.client.put_json(&Self::record_path(id), payload).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&Self::record_path(id)).await
    }

    async fn restore(&self, id: i64) -> Result<E, ApiError> {
        let path = format!("{}/restore", Self::record_path(id));
        self.client.post_json::<(), E>(&path, None).await
    }
}

#[async_trait(?Send)]
impl<E: CollectionEntity> LookupSource for RestCollection<E> {
    async fn fetch_all<T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        self.client.fetch_all(path).await
    }

    async fn fetch_one<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        self.client.fetch_one(path).await
    }
}
