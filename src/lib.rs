//! A red-black tree ordered map for Rust.
//!
//! This crate provides [`RBTreeMap`], an ordered map that keeps its entries in a
//! self-balancing red-black tree. Every insertion, lookup and removal is worst-case
//! O(log n), and on top of the usual map surface it offers callback-driven traversals
//! with early exit:
//!
//! - [`range`](RBTreeMap::range) / [`range_prev`](RBTreeMap::range_prev) - walk all
//!   entries ascending or descending until the callback returns `false`
//! - [`top_min`](RBTreeMap::top_min) / [`top_max`](RBTreeMap::top_max) - visit at most
//!   `limit` of the smallest or largest entries
//! - [`first`](RBTreeMap::first) / [`last`](RBTreeMap::last) - the values at both ends,
//!   or [`Error::NotFound`] on an empty map
//!
//! # Example
//!
//! ```
//! use akai_tree::RBTreeMap;
//!
//! let mut latency = RBTreeMap::new();
//! latency.set(120, "eu-west");
//! latency.set(35, "us-east");
//! latency.set(210, "ap-south");
//! latency.set(80, "us-west");
//!
//! // The two fastest regions.
//! let mut fastest = Vec::new();
//! latency.top_min(2, |_, region| {
//!     fastest.push(*region);
//!     true
//! });
//! assert_eq!(fastest, ["us-east", "us-west"]);
//!
//! assert_eq!(latency.last(), Ok(&"ap-south"));
//! assert!(latency.delete(&210));
//! assert_eq!(latency.last(), Ok(&"eu-west"));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom ordering** - Keys are compared through a [`Comparator`]; any
//!   `Fn(&K, &K) -> Ordering` closure works, [`Natural`] uses `Ord`
//! - **Interchangeable** - [`Map`] and [`SortedMap`] describe the contract, and are also
//!   implemented for the standard `BTreeMap`
//! - **No `unsafe`** - Nodes live in an arena and refer to each other by index
//!
//! # Implementation
//!
//! Nodes carry `left`, `right` and `parent` links as arena handles. The owning edges are
//! `left`/`right`; `parent` exists for rotations and the bottom-up fixup loops after
//! insertion and deletion, and lets iterators step to the next entry without a stack.
//! Deleting a node with two children moves its in-order successor into its place.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod raw;

pub mod api;
pub mod rbtree_map;

pub use api::{Map, SortedMap};
pub use compare::{Comparator, Natural};
pub use error::Error;
pub use rbtree_map::RBTreeMap;
