// SPDX-License-Identifier: MPL-2.0
//! Interactive showcase for the [`Ring`] widget: six labelled cards on a
//! ring. Drag horizontally to spin, release to snap, click a card to bring
//! it to the front.
//!
//! Run with `cargo run --example showcase`.

use iced::widget::{center, column, container, text};
use iced::{Element, Length};
use iced_ring::ring;

const CARD_COUNT: usize = 6;

#[derive(Debug, Default)]
struct Showcase {
    last_selected: Option<usize>,
}

#[derive(Debug, Clone)]
enum Message {
    CardSelected(usize),
}

fn update(state: &mut Showcase, message: Message) {
    match message {
        Message::CardSelected(identity) => {
            log::info!("card {identity} selected");
            state.last_selected = Some(identity);
        }
    }
}

fn view(state: &Showcase) -> Element<'_, Message> {
    let cards = (0..CARD_COUNT).map(|identity| {
        container(center(text(format!("Card {identity}")).size(24)))
            .width(140)
            .height(180)
            .style(container::rounded_box)
            .into()
    });

    let status = match state.last_selected {
        Some(identity) => format!("Selected card {identity}"),
        None => String::from("Drag to spin, click a card to recenter"),
    };

    column![
        ring(cards).on_select(Message::CardSelected),
        center(text(status)).height(Length::Shrink),
    ]
    .spacing(24)
    .padding(24)
    .into()
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application(Showcase::default, update, view)
        .title("iced_ring showcase")
        .run()
}
