//! Client side of the administration panels.
//!
//! [`api::ApiClient`] talks to the HTTP API with a session cookie;
//! [`panel::ResourcePanel`] is the view-model behind one resource screen
//! (list, shared create/edit modal, confirmed delete).

pub mod api;
pub mod panel;
pub mod resources;

pub use api::{ApiClient, ClientError, ResourceApi};
pub use panel::{ModalMode, PanelResource, ResourcePanel, TableView};
