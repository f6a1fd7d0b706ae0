mod client;

pub use client::{Account, GithubClient, RawItem, RawRepository};
