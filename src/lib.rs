//! Signed-token request pipeline for Valence-style REST APIs: route templating,
//! token-augmented queries, single-shot dispatch, and clock-skew aware responses.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod context;
pub mod error;
pub mod executor;
pub mod obs;
pub mod query;
pub mod request;
pub mod response;
pub mod route;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
