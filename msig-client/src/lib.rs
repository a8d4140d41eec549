//! # msig-client
//!
//! A typed client for a multisig proposal indexing service.
//!
//! ## Components
//!
//! - **Client:** [`ProposalsClient`] maps each service endpoint to a typed
//!   method, validates page sizes against the service's ceilings and returns
//!   decoded responses.
//! - **Transport:** [`Transport`] is the seam to the network; [`HttpTransport`]
//!   is the reqwest implementation.
//! - **Pagination:** [`PaginationInfo`] derives page metadata from list responses.
//!
//! ## Example
//!
//! ```rust,no_run
//! use msig_client::{ClientConfig, ListProposalsOptions, Name, PaginationInfo, ProposalsClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ProposalsClient::from_config(&ClientConfig::new()?)?;
//! let page = client
//!     .get_proposals(
//!         ListProposalsOptions::default()
//!             .with_proposer(Name::new("alice")?)
//!             .with_limit(10),
//!     )
//!     .await?;
//! let info = PaginationInfo::for_page(&page, 0, 10);
//! println!("page {} of {}", info.current_page, info.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod limits;
pub mod models;
pub mod name;
pub mod options;
pub mod pagination;
pub mod params;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use client::{ProposalsClient, endpoints};
pub use config::ClientConfig;
pub use error::{ClientError, NameError, TransportError};
pub use limits::{ClientLimits, DEFAULT_MAX_APPROVAL_RESULTS, DEFAULT_MAX_PROPOSAL_RESULTS};
pub use models::*;
pub use name::Name;
pub use options::*;
pub use pagination::PaginationInfo;
pub use params::RequestParams;
pub use transport::{HttpTransport, Transport};
