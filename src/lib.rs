// SPDX-License-Identifier: MPL-2.0
//! `iced_ring` is a 3D rotating ring container widget for the Iced GUI
//! framework.
//!
//! The [`Ring`] widget arranges a fixed set of children along a virtual
//! circle and rotates them about the y axis as the user drags horizontally.
//! Releasing a drag snaps to the nearest slot boundary; tapping a child
//! rotates it to the front and reports its identity index through
//! [`Ring::on_select`].
//!
//! ```no_run
//! use iced::widget::text;
//! use iced_ring::ring;
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     CardSelected(usize),
//! }
//!
//! let carousel = ring((0..6).map(|i| text(format!("Card {i}")).into()))
//!     .on_select(Message::CardSelected);
//! # let _: iced_ring::Ring<'_, Message> = carousel;
//! ```

#![doc(html_root_url = "https://docs.rs/iced_ring/0.1.0")]

pub mod geometry;
pub mod gesture;
pub mod ring;
pub mod settle;
pub mod state;

pub use ring::{ring, Ring};
