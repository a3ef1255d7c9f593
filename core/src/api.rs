//! Network-backed todo operations.
//!
//! Every operation comes in two flavours. The verify flavour (`list`,
//! `create`, ...) insists on the success status and returns an error
//! otherwise. The observe flavour (`*_status`) returns whatever status the
//! service answered with, for negative tests. Transport failures propagate
//! from both.

use std::sync::Arc;

use tracing::info;

use crate::client::{Auth, TodoClient};
use crate::config::HarnessConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::TodoItem;

/// The verify operations the fixture lifecycle relies on.
pub trait TodoService: Send + Sync {
    fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoItem>, ApiError>;
    fn create(&self, item: &TodoItem) -> Result<(), ApiError>;
    fn update(&self, id: i64, item: &TodoItem) -> Result<(), ApiError>;
    fn delete(&self, id: i64) -> Result<(), ApiError>;
}

impl<S: TodoService + ?Sized> TodoService for Arc<S> {
    fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoItem>, ApiError> {
        (**self).list(offset, limit)
    }

    fn create(&self, item: &TodoItem) -> Result<(), ApiError> {
        (**self).create(item)
    }

    fn update(&self, id: i64, item: &TodoItem) -> Result<(), ApiError> {
        (**self).update(id, item)
    }

    fn delete(&self, id: i64) -> Result<(), ApiError> {
        (**self).delete(id)
    }
}

#[derive(Debug, Clone)]
pub struct TodoApi<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl TodoApi<UreqTransport> {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(TodoClient::new(config), UreqTransport::new())
    }
}

impl<T: Transport> TodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoItem>, ApiError> {
        let response = self.transport.execute(self.client.build_list(offset, limit))?;
        self.client.parse_list(response)
    }

    pub fn list_status(&self, offset: i64, limit: i64) -> Result<u16, ApiError> {
        let response = self.transport.execute(self.client.build_list(offset, limit))?;
        Ok(response.status)
    }

    pub fn create(&self, item: &TodoItem) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_create(item)?)?;
        self.client.parse_create(response)?;
        info!(id = ?item.id, text = item.text(), "created todo");
        Ok(())
    }

    pub fn create_status(&self, item: &TodoItem) -> Result<u16, ApiError> {
        let response = self.transport.execute(self.client.build_create(item)?)?;
        Ok(response.status)
    }

    pub fn update(&self, id: i64, item: &TodoItem) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_update(id, item)?)?;
        self.client.parse_update(response)
    }

    pub fn update_status(&self, id: i64, item: &TodoItem) -> Result<u16, ApiError> {
        let response = self.transport.execute(self.client.build_update(id, item)?)?;
        Ok(response.status)
    }

    /// Update with a path segment that need not be an integer.
    pub fn update_status_raw(&self, raw_id: &str, item: &TodoItem) -> Result<u16, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_update_raw(raw_id, item)?)?;
        Ok(response.status)
    }

    /// Deletes as admin; 200 and 204 both count as success.
    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete(id, Auth::Admin))?;
        self.client.parse_delete(response)?;
        info!(id, "deleted todo");
        Ok(())
    }

    pub fn delete_status(&self, id: i64) -> Result<u16, ApiError> {
        let response = self.transport.execute(self.client.build_delete(id, Auth::Admin))?;
        Ok(response.status)
    }

    pub fn delete_status_unauthenticated(&self, id: i64) -> Result<u16, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_delete(id, Auth::Anonymous))?;
        Ok(response.status)
    }
}

impl<T: Transport> TodoService for TodoApi<T> {
    fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoItem>, ApiError> {
        TodoApi::list(self, offset, limit)
    }

    fn create(&self, item: &TodoItem) -> Result<(), ApiError> {
        TodoApi::create(self, item)
    }

    fn update(&self, id: i64, item: &TodoItem) -> Result<(), ApiError> {
        TodoApi::update(self, id, item)
    }

    fn delete(&self, id: i64) -> Result<(), ApiError> {
        TodoApi::delete(self, id)
    }
}
