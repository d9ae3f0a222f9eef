use std::sync::Arc;
use std::time::Duration;

use dioxus::{logger::tracing::info, prelude::*};
use futures_util::StreamExt;

use engine::conn::{
    LinkMonitor, LinkState, DEFAULT_DROP_PROBABILITY, HANDSHAKE_DELAY_MS, LINK_CHECK_INTERVAL_MS,
    RECONNECT_DELAY_MS,
};
use engine::feed::gen::{FeedConfig, Snapshot, TickerFeed};
use engine::sched::update_delay;

use crate::components::{banner::LinkBanner, tickerlist::TickerList};
use crate::utils::time::now_ms;

enum Action {
  Start,
  Stop
}

#[component]
pub fn Ticker() -> Element {
    static CSS: Asset = asset!("/assets/ticker.css");

    let mut feed = use_signal(|| TickerFeed::new(&FeedConfig::default()));
    let mut monitor = use_signal(|| {
        LinkMonitor::new(DEFAULT_DROP_PROBABILITY, None).expect("default drop probability is valid")
    });
    let mut snapshot: Signal<Snapshot> = use_signal(|| Arc::new(Vec::new()));
    let mut link = use_signal(|| LinkState::Connected);
    let scroll_top = use_signal(|| 0.0f64);
    let is_scrolling = use_signal(|| false);
    let scroll_epoch = use_signal(|| 0u64);
    let mut running = use_signal(|| true);

    // pause/resume without tearing the page state down
    let controls = use_coroutine(move |mut rx| async move {
        while let Some(action) = rx.next().await {
            match action {
                Action::Start => running.set(true),
                Action::Stop => running.set(false),
            }
        }
    });

    // seed once, then drive the adaptive update timer; the future dies with
    // the page, taking the timer with it
    use_future(move || async move {
        let initial = feed.write().seed_records(now_ms());
        info!("seeded ticker feed with {} records", initial.len());
        snapshot.set(initial);

        loop {
            async_std::task::sleep(update_delay(is_scrolling())).await;
            if !running() || link() != LinkState::Connected {
                continue;
            }
            let prev = snapshot();
            let next = feed.write().apply_tick(&prev, now_ms());
            snapshot.set(next);
        }
    });

    // periodic link health check plus the staged recovery ladder
    use_future(move || async move {
        loop {
            async_std::task::sleep(Duration::from_millis(LINK_CHECK_INTERVAL_MS)).await;
            if monitor.write().check() != LinkState::Disconnected {
                continue;
            }
            info!("simulated link drop");
            link.set(LinkState::Disconnected);

            async_std::task::sleep(Duration::from_millis(RECONNECT_DELAY_MS)).await;
            monitor.write().begin_reconnect();
            link.set(LinkState::Connecting);

            async_std::task::sleep(Duration::from_millis(HANDSHAKE_DELAY_MS)).await;
            monitor.write().complete_reconnect();
            link.set(LinkState::Connected);
        }
    });

    let total = snapshot().len();
    let ticks = feed.read().ticks();
    let touched = feed.read().records_touched();

    rsx! {
        document::Stylesheet { href: CSS },
        div {
            class: "ticker-page",
            div {
                class: "ticker-header",
                h1 { "Live Market Board" },
                div {
                    class: "ticker-stats",
                    span { class: "stat", "{total} rows" },
                    span { class: "stat", "{ticks} updates" },
                    span { class: "stat", "{touched} records touched" },
                },
                if running() {
                    button {
                        class: "button button-danger",
                        onclick: move |_evt| controls.send(Action::Stop),
                        "Pause feed"
                    }
                } else {
                    button {
                        class: "button",
                        onclick: move |_evt| controls.send(Action::Start),
                        "Resume feed"
                    }
                }
            },
            LinkBanner { link },
            TickerList { snapshot, scroll_top, is_scrolling, scroll_epoch }
        }
    }
}
