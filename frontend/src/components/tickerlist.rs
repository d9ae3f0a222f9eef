#![allow(non_snake_case)]

use std::time::Duration;

use dioxus::prelude::*;
use web_sys::window;

use engine::feed::gen::{Record, Snapshot};
use engine::format::{format_price, format_volume, status_label};
use engine::sched::SCROLL_SETTLE_MS;
use engine::viewport::RowLayout;

pub const ROW_HEIGHT: f64 = 40.0;
pub const VISIBLE_ROWS: usize = 10;
const VIEWPORT_ID: &str = "ticker-viewport";

#[component]
pub fn TickerList(
    snapshot: Signal<Snapshot>,
    scroll_top: Signal<f64>,
    is_scrolling: Signal<bool>,
    scroll_epoch: Signal<u64>,
) -> Element {
    let mut scroll_top = scroll_top;
    let mut is_scrolling = is_scrolling;
    let mut scroll_epoch = scroll_epoch;

    let layout = RowLayout::new(ROW_HEIGHT, VISIBLE_ROWS).expect("row layout constants are valid");

    let items = snapshot();
    let range = layout.visible_range(scroll_top(), items.len());
    let offset_top = layout.offset_top(&range);
    let content_height = layout.content_height(items.len());
    let viewport_height = ROW_HEIGHT * VISIBLE_ROWS as f64;

    rsx! {
        div {
            id: VIEWPORT_ID,
            class: "ticker-viewport",
            style: "height: {viewport_height}px;",
            onscroll: move |_evt| {
                if let Some(el) = window()
                    .and_then(|w| w.document())
                    .and_then(|doc| doc.get_element_by_id(VIEWPORT_ID))
                {
                    scroll_top.set(el.scroll_top() as f64);
                }
                // trailing debounce: the flag drops only once scroll events
                // stop arriving for a settle window
                is_scrolling.set(true);
                let epoch = scroll_epoch() + 1;
                scroll_epoch.set(epoch);
                spawn(async move {
                    async_std::task::sleep(Duration::from_millis(SCROLL_SETTLE_MS)).await;
                    if scroll_epoch() == epoch {
                        is_scrolling.set(false);
                    }
                });
            },
            div {
                class: "ticker-spacer",
                style: "height: {content_height}px;",
                div {
                    class: "ticker-rows",
                    style: "transform: translateY({offset_top}px);",
                    for record in items[range.start..range.end()].iter() {
                        TickerRow { key: "{record.id}", record: record.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn TickerRow(record: Record) -> Element {
    let direction = if record.change >= 0.0 { "up" } else { "down" };
    let price = format_price(record.price);
    let volume = format_volume(record.volume);
    let status = status_label(record.status);

    rsx! {
        div {
            class: "ticker-row",
            span { class: "ticker-dot ticker-dot-{status}" },
            span { class: "ticker-symbol", "{record.symbol}" },
            span { class: "ticker-price", "{price}" },
            span { class: "ticker-change ticker-change-{direction}", "{record.change_percent:+.2}%" },
            span { class: "ticker-volume", "{volume}" },
        }
    }
}
