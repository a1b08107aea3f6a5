#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod config;
pub mod errors;
pub mod refs;
pub mod remote;

pub use config::{ConfigLookup, ConfigStore, RepoConfig};
pub use refs::{GitRef, RefKind};
pub use remote::RemoteDescription;
