#![allow(non_snake_case)]

use dioxus::prelude::*;
use engine::conn::LinkState;

#[component]
pub fn LinkBanner(link: Signal<LinkState>) -> Element {
    match link() {
        LinkState::Connected => rsx! {},
        LinkState::Connecting => rsx! {
            div { class: "link-banner link-banner-connecting", "Reconnecting to the feed..." }
        },
        LinkState::Disconnected => rsx! {
            div { class: "link-banner link-banner-down", "Feed link lost. Updates are paused until it recovers." }
        },
    }
}
